use futures::channel::mpsc::{self, UnboundedReceiver};

use crate::canvas::{Canvas, DrawingSurface, FitMode};
use crate::event::CanvasEvent;
use crate::export;
use crate::input::{CanvasInput, InputHandler};
use crate::panels;
use crate::state::{LineType, Preferences, SessionState};
use crate::stroke::StrokeRef;
use crate::upload::{UploadHandler, UploadOutcome};

/// One line of feedback under the controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// Top-level controller: owns the session, the canvas and the upload handler
pub struct EstimatorApp {
    session: SessionState,
    canvas: DrawingSurface,
    input: InputHandler,
    uploads: UploadHandler,
    // Fed by the canvas' stroke callback, drained right after input handling
    completed_strokes: UnboundedReceiver<StrokeRef>,
    // Line type selected at pointer-down of the stroke in progress
    stroke_line_type: Option<LineType>,
    status: Option<Status>,
}

impl Default for EstimatorApp {
    fn default() -> Self {
        Self::with_preferences(Preferences::default())
    }
}

impl EstimatorApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Load previous control settings (if any).
        let preferences = cc
            .storage
            .and_then(|storage| eframe::get_value::<Preferences>(storage, eframe::APP_KEY))
            .unwrap_or_default();
        log::info!("Starting with {:?}", preferences);
        Self::with_preferences(preferences)
    }

    pub fn with_preferences(preferences: Preferences) -> Self {
        let mut canvas = DrawingSurface::default();

        let (sender, completed_strokes) = mpsc::unbounded();
        canvas.on_stroke_completed(Box::new(move |stroke: &StrokeRef| {
            // The receiver lives as long as the app, which owns the canvas
            let _ = sender.unbounded_send(stroke.clone());
        }));
        canvas.subscribe(Box::new(|event: &CanvasEvent| {
            if let CanvasEvent::BackgroundReplaced { width, height, scale } = event {
                log::debug!("Background {width}x{height} shown at {:.0}%", scale * 100.0);
            }
        }));

        let mut app = Self {
            session: SessionState::from_preferences(preferences),
            canvas,
            input: InputHandler::new(),
            uploads: UploadHandler::new(),
            completed_strokes,
            stroke_line_type: None,
            status: None,
        };
        app.sync_brush();
        app
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    pub fn canvas(&self) -> &DrawingSurface {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut DrawingSurface {
        &mut self.canvas
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn is_upload_pending(&self) -> bool {
        self.uploads.is_pending()
    }

    /// Push the selected pen onto the canvas
    pub fn sync_brush(&mut self) {
        self.canvas.set_brush_width(self.session.brush_size().width());
        self.canvas.set_brush_color(self.session.line_type().stroke_color());
    }

    /// Feed pointer events to the canvas and count every stroke they complete.
    ///
    /// A stroke is counted as the line type selected when it began, which is
    /// also the colour it was drawn in.
    pub fn handle_canvas_input(&mut self, inputs: impl IntoIterator<Item = CanvasInput>) {
        for input in inputs {
            if let CanvasInput::PointerDown(_) = input {
                self.stroke_line_type = Some(self.session.line_type());
            }
            self.canvas.handle_input(input);
            self.count_completed_strokes();
        }
    }

    fn count_completed_strokes(&mut self) {
        while let Ok(stroke) = self.completed_strokes.try_recv() {
            let line_type = self
                .stroke_line_type
                .take()
                .unwrap_or_else(|| self.session.line_type());
            self.session.record_stroke(line_type);
            log::debug!(
                "Counted {} stroke ({} points), {} total",
                line_type.tag(),
                stroke.points().len(),
                self.session.counts().get(line_type)
            );
        }
    }

    pub(crate) fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    /// Open the file picker; the result is applied on a later frame
    pub fn begin_upload(&mut self, ctx: &egui::Context) {
        self.uploads.begin(ctx);
    }

    /// Apply a finished upload, if one arrived since the last frame
    pub fn poll_upload(&mut self) {
        if let Some(outcome) = self.uploads.poll() {
            self.apply_upload(outcome);
        }
    }

    pub fn apply_upload(&mut self, outcome: UploadOutcome) {
        match outcome.result {
            Ok(image) => {
                log::info!("Loaded {} ({}x{})", outcome.file_name, image.width(), image.height());
                self.canvas.set_background_image(image, FitMode::Contain);
                self.status = Some(Status::Info(format!("Loaded {}", outcome.file_name)));
            }
            Err(err) => {
                // Background is left as it was
                log::warn!("Upload of {} failed: {}", outcome.file_name, err);
                self.status = Some(Status::Error(format!("{}: {}", outcome.file_name, err)));
            }
        }
    }

    pub fn export(&mut self) {
        match export::export_png(&self.canvas) {
            Ok(Some(target)) => {
                self.status = Some(Status::Info(format!("Exported to {target}")));
            }
            Ok(None) => {}
            Err(err) => {
                log::error!("Export failed: {}", err);
                self.status = Some(Status::Error(format!("Export failed: {err}")));
            }
        }
    }
}

impl eframe::App for EstimatorApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.session.preferences());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_upload();

        egui::TopBottomPanel::top("title_panel").show(ctx, |ui| {
            ui.heading("Pretty Lit Estimator");
        });

        panels::controls_panel(self, ctx);
        self.sync_brush();
        panels::canvas_panel(self, ctx);

        if self.is_upload_pending() {
            // Keep the spinner moving until the decode lands
            ctx.request_repaint();
        }
    }
}
