use egui::Pos2;
use pretty_lit_estimator::input::CanvasInput;
use pretty_lit_estimator::state::Preferences;
use pretty_lit_estimator::{BrushSize, EstimatorApp, LineType, Spacing};

fn stroke(app: &mut EstimatorApp, y: f32) {
    app.handle_canvas_input([
        CanvasInput::PointerDown(Pos2::new(10.0, y)),
        CanvasInput::PointerMove(Pos2::new(60.0, y)),
        CanvasInput::PointerMove(Pos2::new(120.0, y + 5.0)),
        CanvasInput::PointerUp,
    ]);
}

fn select(app: &mut EstimatorApp, line_type: LineType) {
    app.session_mut().set_line_type(line_type);
    app.sync_brush();
}

#[test]
fn test_gutters_and_roof_at_twelve_inches() {
    let mut app = EstimatorApp::default();
    stroke(&mut app, 10.0);
    stroke(&mut app, 20.0);
    select(&mut app, LineType::Roof);
    stroke(&mut app, 30.0);

    assert_eq!(app.session().estimate().to_string(), "22.00");
}

#[test]
fn test_bushes_at_fifteen_inches() {
    let mut app = EstimatorApp::with_preferences(Preferences {
        line_type: LineType::Bush,
        spacing: Spacing::Inches15,
        brush_size: BrushSize::default(),
    });
    for i in 0..4 {
        stroke(&mut app, i as f32 * 10.0);
    }

    assert_eq!(app.session().counts().get(LineType::Bush), 4);
    assert_eq!(app.session().estimate().to_string(), "25.00");
}

#[test]
fn test_total_count_matches_strokes_drawn() {
    let mut app = EstimatorApp::default();
    let plan = [
        LineType::Gutter,
        LineType::Bush,
        LineType::Bush,
        LineType::Roof,
        LineType::Gutter,
        LineType::Bush,
    ];
    for (i, line_type) in plan.into_iter().enumerate() {
        select(&mut app, line_type);
        stroke(&mut app, i as f32 * 15.0);
    }

    let counts = app.session().counts();
    assert_eq!(counts.total() as usize, plan.len());
    assert_eq!(app.canvas().strokes().len(), plan.len());
    assert_eq!(counts.get(LineType::Gutter), 2);
    assert_eq!(counts.get(LineType::Roof), 1);
    assert_eq!(counts.get(LineType::Bush), 3);
}

#[test]
fn test_brush_size_only_changes_pen() {
    let mut app = EstimatorApp::default();
    stroke(&mut app, 10.0);
    let before = app.session().estimate();

    app.session_mut().set_brush_size(BrushSize::new(20));
    app.sync_brush();
    stroke(&mut app, 40.0);

    assert_eq!(app.canvas().strokes()[0].thickness(), 10.0);
    assert_eq!(app.canvas().strokes()[1].thickness(), 20.0);
    // One more gutter stroke, the width plays no part
    assert_eq!(before.to_string(), "7.00");
    assert_eq!(app.session().estimate().to_string(), "14.00");
}

#[test]
fn test_clicks_are_not_counted() {
    let mut app = EstimatorApp::default();
    app.handle_canvas_input([
        CanvasInput::PointerDown(Pos2::new(10.0, 10.0)),
        CanvasInput::PointerUp,
    ]);

    assert_eq!(app.session().counts().total(), 0);
    assert_eq!(app.session().estimate().to_string(), "0.00");
}
