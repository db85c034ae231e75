use egui::{Color32, Pos2};
use std::sync::Arc;

// Immutable stroke, retained by the canvas once finished
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

// Stroke still being drawn
#[derive(Debug)]
pub struct MutableStroke {
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

// Shared handle handed out to event handlers
pub type StrokeRef = Arc<Stroke>;

impl Stroke {
    pub fn new(color: Color32, thickness: f32, points: Vec<Pos2>) -> Self {
        Self {
            points,
            color,
            thickness,
        }
    }

    /// Points in canvas-local coordinates
    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }
}

impl MutableStroke {
    pub fn new(color: Color32, thickness: f32) -> Self {
        Self {
            points: Vec::new(),
            color,
            thickness,
        }
    }

    // Repeated positions (pointer held still) are dropped
    pub fn add_point(&mut self, point: Pos2) {
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    /// A press that never left its first point is a click, not a stroke
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn into_stroke_ref(self) -> StrokeRef {
        Arc::new(Stroke::new(self.color, self.thickness, self.points))
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_points_are_skipped() {
        let mut stroke = MutableStroke::new(Color32::BLACK, 10.0);
        stroke.add_point(Pos2::new(1.0, 1.0));
        stroke.add_point(Pos2::new(1.0, 1.0));
        assert!(!stroke.is_drawable());

        stroke.add_point(Pos2::new(2.0, 1.0));
        assert!(stroke.is_drawable());
        assert_eq!(stroke.points().len(), 2);
    }
}
