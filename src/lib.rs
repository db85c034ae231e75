#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod error;
pub mod estimate;
pub mod event;
pub mod export;
pub mod input;
pub mod panels;
pub mod state;
pub mod stroke;
pub mod upload;

pub use app::EstimatorApp;
pub use canvas::{Canvas, DrawingSurface, FitMode};
pub use error::{ExportError, UploadError};
pub use estimate::Estimate;
pub use state::{BrushSize, LineType, SessionState, Spacing, StrokeCounts};
pub use stroke::Stroke;
