use thiserror::Error;

/// Why an uploaded file did not become the background
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Failed to read {name}: {reason}")]
    Read { name: String, reason: String },
    #[error("Unsupported or corrupt image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

/// Errors that can occur while flattening or saving the canvas
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Failed to write image: {0}")]
    Write(#[from] std::io::Error),
    #[error("Browser download failed: {0}")]
    Browser(String),
}
