//! Drawing surface abstraction.
//!
//! The rest of the application only talks to the canvas through [`Canvas`],
//! so the egui-backed [`DrawingSurface`] could be swapped for another engine.

mod background;
mod raster;
mod surface;

use egui::Color32;
use image::{ImageFormat, RgbaImage};

use crate::error::ExportError;
use crate::event::EventHandler;
use crate::stroke::StrokeRef;

pub use background::{Background, FitMode};
pub use raster::{encode, flatten};
pub use surface::DrawingSurface;

/// Width and height of the drawing area, also the size of every export
pub const CANVAS_SIZE: [u32; 2] = [800, 600];

/// Callback invoked with each completed stroke
pub type StrokeCallback = Box<dyn FnMut(&StrokeRef) + Send>;

pub trait Canvas {
    /// Raster size in pixels
    fn size(&self) -> [u32; 2];

    /// Register a callback for finished strokes
    fn on_stroke_completed(&mut self, callback: StrokeCallback);

    /// Register a handler for every canvas event
    fn subscribe(&mut self, handler: Box<dyn EventHandler>);

    /// Replace the background wholesale
    fn set_background_image(&mut self, image: RgbaImage, fit: FitMode);

    fn set_brush_width(&mut self, width: f32);

    fn set_brush_color(&mut self, color: Color32);

    /// Render background and strokes to an encoded raster of `size()` pixels
    fn export_raster(&self, format: ImageFormat) -> Result<Vec<u8>, ExportError>;
}
