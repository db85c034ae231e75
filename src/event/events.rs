use crate::stroke::StrokeRef;

#[derive(Debug, Clone)]
pub enum CanvasEvent {
    /// A freehand stroke was finished and is now part of the canvas
    StrokeCompleted { stroke: StrokeRef },
    /// The background image was replaced
    BackgroundReplaced {
        width: u32,
        height: u32,
        scale: f32,
    },
}
