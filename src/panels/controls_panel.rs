use crate::EstimatorApp;
use crate::app::Status;
use crate::estimate;
use crate::state::{BrushSize, LineType, Spacing};

pub fn controls_panel(app: &mut EstimatorApp, ctx: &egui::Context) {
    egui::SidePanel::left("controls_panel")
        .resizable(false)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("📂 Upload photo").clicked() {
                    app.begin_upload(ctx);
                }
                if app.is_upload_pending() {
                    ui.spinner();
                }
            });

            ui.separator();

            let session = app.session_mut();

            let mut pixels = session.brush_size().pixels();
            let slider = egui::Slider::new(&mut pixels, BrushSize::MIN..=BrushSize::MAX)
                .text("Bulb Size")
                .suffix("px");
            if ui.add(slider).changed() {
                session.set_brush_size(BrushSize::new(pixels));
            }

            let mut spacing = session.spacing();
            egui::ComboBox::from_label("Spacing")
                .selected_text(spacing.label())
                .show_ui(ui, |ui| {
                    for option in Spacing::ALL {
                        ui.selectable_value(&mut spacing, option, option.label());
                    }
                });
            session.set_spacing(spacing);

            let mut line_type = session.line_type();
            egui::ComboBox::from_label("Line Type")
                .selected_text(line_type.label())
                .show_ui(ui, |ui| {
                    for option in LineType::ALL {
                        ui.selectable_value(&mut line_type, option, option.label());
                    }
                });
            session.set_line_type(line_type);

            ui.separator();

            let counts = *session.counts();
            egui::Grid::new("stroke_counts_grid")
                .num_columns(2)
                .spacing([24.0, 4.0])
                .striped(true)
                .show(ui, |ui| {
                    for line_type in LineType::ALL {
                        ui.colored_label(line_type.stroke_color(), line_type.label());
                        ui.label(counts.get(line_type).to_string());
                        ui.end_row();
                    }
                });

            ui.add_space(8.0);
            ui.label(
                egui::RichText::new(estimate::readout(session.estimate()))
                    .size(18.0)
                    .strong(),
            );

            ui.separator();

            if ui.button("💾 Export PNG").clicked() {
                app.export();
            }

            match app.status() {
                Some(Status::Info(message)) => {
                    ui.label(message);
                }
                Some(Status::Error(message)) => {
                    ui.colored_label(ui.visuals().error_fg_color, message);
                }
                None => {}
            }
        });
}
