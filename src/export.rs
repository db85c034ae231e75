use image::ImageFormat;

use crate::canvas::Canvas;
use crate::error::ExportError;

/// File name offered for every export
pub const EXPORT_FILE_NAME: &str = "layout.png";

/// Where an export ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportTarget {
    File(std::path::PathBuf),
    Download(String),
}

impl std::fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportTarget::File(path) => write!(f, "{}", path.display()),
            ExportTarget::Download(name) => write!(f, "download {name}"),
        }
    }
}

/// Flatten the canvas to PNG and hand it to the user.
///
/// Returns `Ok(None)` when the user dismisses the save dialog.
pub fn export_png(canvas: &dyn Canvas) -> Result<Option<ExportTarget>, ExportError> {
    let bytes = canvas.export_raster(ImageFormat::Png)?;
    log::debug!("Encoded {} bytes of PNG", bytes.len());
    save(&bytes)
}

#[cfg(not(target_arch = "wasm32"))]
fn save(bytes: &[u8]) -> Result<Option<ExportTarget>, ExportError> {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export layout")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("PNG image", &["png"])
        .save_file()
    else {
        log::debug!("Export cancelled");
        return Ok(None);
    };

    std::fs::write(&path, bytes)?;
    log::info!("📦 Exported layout to {}", path.display());
    Ok(Some(ExportTarget::File(path)))
}

#[cfg(target_arch = "wasm32")]
fn save(bytes: &[u8]) -> Result<Option<ExportTarget>, ExportError> {
    use wasm_bindgen::JsCast;

    let js_err = |err: wasm_bindgen::JsValue| ExportError::Browser(format!("{err:?}"));

    let window = web_sys::window().ok_or_else(|| ExportError::Browser("no window".to_owned()))?;
    let document = window
        .document()
        .ok_or_else(|| ExportError::Browser("no document".to_owned()))?;

    let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let anchor = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ExportError::Browser("not an anchor element".to_owned()))?;
    anchor.set_href(&url);
    anchor.set_download(EXPORT_FILE_NAME);
    anchor.click();
    web_sys::Url::revoke_object_url(&url).map_err(js_err)?;

    log::info!("📦 Downloaded {EXPORT_FILE_NAME}");
    Ok(Some(ExportTarget::Download(EXPORT_FILE_NAME.to_owned())))
}
