use egui::{Pos2, Rect, Response};

/// Pointer events in canvas-local coordinates (origin at the canvas' top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasInput {
    /// Primary button pressed on the canvas
    PointerDown(Pos2),
    /// Pointer moved while the button is held
    PointerMove(Pos2),
    /// Button released, wherever the pointer is
    PointerUp,
}

/// Handles converting raw egui interaction into CanvasInputs
#[derive(Debug, Default)]
pub struct InputHandler {
    dragging: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate this frame's interaction with the canvas `rect` into events
    pub fn process(&mut self, response: &Response, rect: Rect) -> Vec<CanvasInput> {
        let to_local = |pos: Pos2| (pos - rect.min).to_pos2();
        let mut events = Vec::new();
        let pointer = response.interact_pointer_pos();

        if response.drag_started() {
            if let Some(pos) = pointer {
                events.push(CanvasInput::PointerDown(to_local(pos)));
                self.dragging = true;
            }
        }

        if self.dragging && response.dragged() {
            if let Some(pos) = pointer {
                events.push(CanvasInput::PointerMove(to_local(pos)));
            }
        }

        if self.dragging && response.drag_stopped() {
            // egui may still report the release position
            if let Some(pos) = pointer {
                events.push(CanvasInput::PointerMove(to_local(pos)));
            }
            events.push(CanvasInput::PointerUp);
            self.dragging = false;
        }

        events
    }
}
