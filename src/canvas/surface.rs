use egui::{Color32, Painter, Pos2, Rect, Stroke as EguiStroke, TextureHandle, TextureOptions, Vec2};
use image::{ImageFormat, RgbaImage};
use log::{debug, info, warn};

use super::{Background, Canvas, CANVAS_SIZE, FitMode, StrokeCallback, encode, flatten};
use crate::error::ExportError;
use crate::event::{CanvasEvent, EventBus, EventHandler};
use crate::input::CanvasInput;
use crate::stroke::{MutableStroke, StrokeRef};

/// Freehand drawing surface backed by an egui painter
pub struct DrawingSurface {
    size: [u32; 2],
    background: Option<Background>,
    strokes: Vec<StrokeRef>,
    // The stroke being drawn (if any)
    current_stroke: Option<MutableStroke>,
    brush_width: f32,
    brush_color: Color32,
    events: EventBus,

    // Uploaded lazily on the next paint after the background changes
    background_texture: Option<TextureHandle>,
}

// Custom Debug implementation since TextureHandle doesn't implement Debug
impl std::fmt::Debug for DrawingSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawingSurface")
            .field("size", &self.size)
            .field("background", &self.background)
            .field("strokes", &self.strokes.len())
            .field("drawing", &self.current_stroke.is_some())
            .field("brush_width", &self.brush_width)
            .field("brush_color", &self.brush_color)
            .field("events", &self.events)
            .finish()
    }
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::new(CANVAS_SIZE)
    }
}

impl DrawingSurface {
    pub fn new(size: [u32; 2]) -> Self {
        Self {
            size,
            background: None,
            strokes: Vec::new(),
            current_stroke: None,
            brush_width: 10.0,
            brush_color: Color32::BLACK,
            events: EventBus::new(),
            background_texture: None,
        }
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    pub fn strokes(&self) -> &[StrokeRef] {
        &self.strokes
    }

    pub fn brush_width(&self) -> f32 {
        self.brush_width
    }

    pub fn brush_color(&self) -> Color32 {
        self.brush_color
    }

    pub fn is_drawing(&self) -> bool {
        self.current_stroke.is_some()
    }

    /// Size of the drawing area in egui points
    pub fn display_size(&self) -> Vec2 {
        Vec2::new(self.size[0] as f32, self.size[1] as f32)
    }

    /// Feed one pointer event, in canvas-local coordinates
    pub fn handle_input(&mut self, input: CanvasInput) {
        match input {
            CanvasInput::PointerDown(pos) => self.begin_stroke(pos),
            CanvasInput::PointerMove(pos) => {
                if let Some(stroke) = &mut self.current_stroke {
                    stroke.add_point(pos);
                }
            }
            CanvasInput::PointerUp => self.finish_stroke(),
        }
    }

    fn begin_stroke(&mut self, pos: Pos2) {
        // Width and colour are fixed for the whole stroke
        let mut stroke = MutableStroke::new(self.brush_color, self.brush_width);
        stroke.add_point(pos);
        self.current_stroke = Some(stroke);
    }

    fn finish_stroke(&mut self) {
        let Some(stroke) = self.current_stroke.take() else {
            return;
        };
        if !stroke.is_drawable() {
            debug!("Discarding click without movement");
            return;
        }

        let stroke = stroke.into_stroke_ref();
        debug!("🖌️ Stroke completed: {} points", stroke.points().len());
        self.strokes.push(stroke.clone());
        self.events.emit(CanvasEvent::StrokeCompleted { stroke });
    }

    /// Paint background, finished strokes and the stroke in progress into `rect`
    pub fn paint(&mut self, ctx: &egui::Context, painter: &Painter, rect: Rect) {
        painter.rect_filled(rect, 0.0, Color32::WHITE);

        if let Some(background) = &self.background {
            let texture = self.background_texture.get_or_insert_with(|| {
                let max_side = ctx.input(|i| i.max_texture_side) as u32;
                ctx.load_texture(
                    "canvas_background",
                    background.to_color_image(max_side),
                    TextureOptions::LINEAR,
                )
            });
            let image_rect = Rect::from_min_size(rect.min, background.display_size());
            painter.image(
                texture.id(),
                image_rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        let offset = rect.min.to_vec2();
        for stroke in &self.strokes {
            paint_polyline(painter, stroke.points(), offset, stroke.thickness(), stroke.color());
        }
        if let Some(stroke) = &self.current_stroke {
            paint_polyline(painter, stroke.points(), offset, stroke.thickness(), stroke.color());
        }
    }
}

fn paint_polyline(painter: &Painter, points: &[Pos2], offset: Vec2, thickness: f32, color: Color32) {
    let points: Vec<Pos2> = points.iter().map(|p| *p + offset).collect();
    // Round tips, the way a pen dab looks
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        painter.circle_filled(*first, thickness / 2.0, color);
        painter.circle_filled(*last, thickness / 2.0, color);
    }
    if points.len() >= 2 {
        painter.add(egui::Shape::line(points, EguiStroke::new(thickness, color)));
    }
}

impl Canvas for DrawingSurface {
    fn size(&self) -> [u32; 2] {
        self.size
    }

    fn on_stroke_completed(&mut self, mut callback: StrokeCallback) {
        self.events.subscribe(Box::new(move |event: &CanvasEvent| {
            if let CanvasEvent::StrokeCompleted { stroke } = event {
                callback(stroke);
            }
        }));
    }

    fn subscribe(&mut self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    fn set_background_image(&mut self, image: RgbaImage, fit: FitMode) {
        if image.width() == 0 || image.height() == 0 {
            warn!("Ignoring empty background {}x{}", image.width(), image.height());
            return;
        }
        let background = Background::new(image, self.size, fit);
        info!(
            "🖼️ Background set: {}x{} at scale {:.3}",
            background.image().width(),
            background.image().height(),
            background.scale()
        );
        let event = CanvasEvent::BackgroundReplaced {
            width: background.image().width(),
            height: background.image().height(),
            scale: background.scale(),
        };
        self.background = Some(background);
        self.background_texture = None;
        self.events.emit(event);
    }

    fn set_brush_width(&mut self, width: f32) {
        self.brush_width = width;
    }

    fn set_brush_color(&mut self, color: Color32) {
        self.brush_color = color;
    }

    fn export_raster(&self, format: ImageFormat) -> Result<Vec<u8>, ExportError> {
        let image = flatten(
            self.size,
            self.background.as_ref(),
            self.strokes.iter().map(|stroke| stroke.as_ref()),
        );
        encode(&image, format)
    }
}
