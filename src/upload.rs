//! Background image upload.
//!
//! Picking, reading and decoding run off the UI thread. Results land in a
//! shared [`UploadQueue`] that the UI polls every frame; only the most
//! recently picked file is ever applied.

use std::sync::Arc;

use image::RgbaImage;
use parking_lot::Mutex;

use crate::error::UploadError;

/// Extensions offered by the file picker
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// A finished upload, successful or not
#[derive(Debug)]
pub struct UploadOutcome {
    pub ticket: u64,
    pub file_name: String,
    pub result: Result<RgbaImage, UploadError>,
}

#[derive(Debug, Default)]
struct Slot {
    issued: u64,
    ready: Option<UploadOutcome>,
}

/// Hand-off point between upload tasks and the UI thread
#[derive(Debug, Clone, Default)]
pub struct UploadQueue {
    slot: Arc<Mutex<Slot>>,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a ticket for a freshly picked file; it supersedes all older tickets
    pub fn issue(&self) -> u64 {
        let mut slot = self.slot.lock();
        slot.issued += 1;
        slot.issued
    }

    /// Store a finished upload. Returns false if a newer file was picked meanwhile.
    pub fn complete(&self, outcome: UploadOutcome) -> bool {
        let mut slot = self.slot.lock();
        if outcome.ticket != slot.issued {
            log::debug!(
                "Discarding stale upload {} (ticket {}, latest {})",
                outcome.file_name,
                outcome.ticket,
                slot.issued
            );
            return false;
        }
        slot.ready = Some(outcome);
        true
    }

    /// Take the pending result, if any
    pub fn take(&self) -> Option<UploadOutcome> {
        self.slot.lock().ready.take()
    }

    /// True while the latest picked file has not produced a result yet
    pub fn is_pending(&self, last_taken: u64) -> bool {
        let slot = self.slot.lock();
        slot.issued > last_taken && slot.ready.is_none()
    }
}

/// Decode PNG/JPEG bytes into RGBA pixels
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, UploadError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    if image.width() == 0 || image.height() == 0 {
        return Err(UploadError::EmptyImage {
            width: image.width(),
            height: image.height(),
        });
    }
    log::debug!("Decoded image: {}x{}", image.width(), image.height());
    Ok(image)
}

/// Starts uploads and tracks which result the UI has consumed
#[derive(Debug, Default)]
pub struct UploadHandler {
    queue: UploadQueue,
    last_taken: u64,
}

impl UploadHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self) -> &UploadQueue {
        &self.queue
    }

    /// Open the file picker without blocking the UI
    pub fn begin(&self, ctx: &egui::Context) {
        spawn_upload(self.queue.clone(), ctx.clone());
    }

    /// Result of the latest upload, once per upload
    pub fn poll(&mut self) -> Option<UploadOutcome> {
        let outcome = self.queue.take()?;
        self.last_taken = outcome.ticket;
        Some(outcome)
    }

    pub fn is_pending(&self) -> bool {
        self.queue.is_pending(self.last_taken)
    }
}

async fn pick_and_decode(queue: UploadQueue, ctx: egui::Context) {
    let picked = rfd::AsyncFileDialog::new()
        .set_title("Choose a photo")
        .add_filter("Image", &IMAGE_EXTENSIONS)
        .pick_file()
        .await;

    let Some(file) = picked else {
        log::debug!("No file selected");
        return;
    };

    let ticket = queue.issue();
    let file_name = file.file_name();
    log::info!("Uploading {file_name}");

    let result = read_file(&file).await.and_then(|bytes| decode_image(&bytes));
    if queue.complete(UploadOutcome {
        ticket,
        file_name,
        result,
    }) {
        ctx.request_repaint();
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn read_file(file: &rfd::FileHandle) -> Result<Vec<u8>, UploadError> {
    std::fs::read(file.path()).map_err(|err| UploadError::Read {
        name: file.file_name(),
        reason: err.to_string(),
    })
}

#[cfg(target_arch = "wasm32")]
async fn read_file(file: &rfd::FileHandle) -> Result<Vec<u8>, UploadError> {
    Ok(file.read().await)
}

// The dialog future is built on the worker so it never has to be Send
#[cfg(not(target_arch = "wasm32"))]
fn spawn_upload(queue: UploadQueue, ctx: egui::Context) {
    std::thread::spawn(move || futures::executor::block_on(pick_and_decode(queue, ctx)));
}

#[cfg(target_arch = "wasm32")]
fn spawn_upload(queue: UploadQueue, ctx: egui::Context) {
    wasm_bindgen_futures::spawn_local(pick_and_decode(queue, ctx));
}
