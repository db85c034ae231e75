use crate::EstimatorApp;

pub fn canvas_panel(app: &mut EstimatorApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().show(ui, |ui| {
            let size = app.canvas().display_size();
            let (response, painter) = ui.allocate_painter(size, egui::Sense::drag());
            let rect = response.rect;

            let inputs = app.input_mut().process(&response, rect);
            app.handle_canvas_input(inputs);

            app.canvas_mut().paint(ctx, &painter, rect);
            painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, egui::Color32::from_gray(200)));

            if response.hovered() {
                ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
            }
        });
    });
}
