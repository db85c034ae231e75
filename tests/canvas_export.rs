use egui::{Color32, Pos2};
use image::{ImageFormat, Rgba, RgbaImage};
use pretty_lit_estimator::canvas::{CANVAS_SIZE, Canvas, DrawingSurface, FitMode};
use pretty_lit_estimator::input::CanvasInput;
use pretty_lit_estimator::stroke::StrokeRef;

fn decode(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .unwrap()
        .to_rgba8()
}

fn draw(surface: &mut DrawingSurface, from: Pos2, to: Pos2) {
    surface.handle_input(CanvasInput::PointerDown(from));
    surface.handle_input(CanvasInput::PointerMove(to));
    surface.handle_input(CanvasInput::PointerUp);
}

#[test]
fn test_blank_canvas_exports_white_800x600() {
    let surface = DrawingSurface::default();
    let bytes = surface.export_raster(ImageFormat::Png).unwrap();
    assert!(!bytes.is_empty());

    let image = decode(&bytes);
    assert_eq!(image.dimensions(), (CANVAS_SIZE[0], CANVAS_SIZE[1]));
    assert_eq!(*image.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    assert_eq!(*image.get_pixel(799, 599), Rgba([255, 255, 255, 255]));
}

#[test]
fn test_export_contains_background_and_strokes() {
    let mut surface = DrawingSurface::default();

    // Wide blue photo: fitted to 800x200 along the top edge
    let photo = RgbaImage::from_pixel(1600, 400, Rgba([0, 0, 255, 255]));
    surface.set_background_image(photo, FitMode::Contain);

    surface.set_brush_color(Color32::RED);
    surface.set_brush_width(10.0);
    draw(&mut surface, Pos2::new(100.0, 400.0), Pos2::new(700.0, 400.0));

    let image = decode(&surface.export_raster(ImageFormat::Png).unwrap());
    assert_eq!(image.dimensions(), (800, 600));
    assert_eq!(*image.get_pixel(400, 100), Rgba([0, 0, 255, 255]));
    assert_eq!(*image.get_pixel(400, 400), Rgba([255, 0, 0, 255]));
    assert_eq!(*image.get_pixel(400, 300), Rgba([255, 255, 255, 255]));
}

#[test]
fn test_reupload_replaces_background() {
    let mut surface = DrawingSurface::default();
    surface.set_background_image(RgbaImage::new(800, 600), FitMode::Contain);
    surface.set_background_image(
        RgbaImage::from_pixel(200, 300, Rgba([0, 255, 0, 255])),
        FitMode::Contain,
    );

    let background = surface.background().unwrap();
    assert_eq!(background.image().dimensions(), (200, 300));
    assert_eq!(background.scale(), 2.0);

    let image = decode(&surface.export_raster(ImageFormat::Png).unwrap());
    assert_eq!(*image.get_pixel(10, 10), Rgba([0, 255, 0, 255]));
    // Right of the 400px wide fitted photo
    assert_eq!(*image.get_pixel(600, 10), Rgba([255, 255, 255, 255]));
}

#[test]
fn test_stroke_callback_fires_once_per_stroke() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let mut surface = DrawingSurface::default();
    let completed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&completed);
    surface.on_stroke_completed(Box::new(move |stroke: &StrokeRef| {
        assert!(stroke.points().len() >= 2);
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    draw(&mut surface, Pos2::new(0.0, 0.0), Pos2::new(50.0, 50.0));
    // A click without movement
    draw(&mut surface, Pos2::new(5.0, 5.0), Pos2::new(5.0, 5.0));
    draw(&mut surface, Pos2::new(10.0, 0.0), Pos2::new(60.0, 50.0));

    assert_eq!(completed.load(Ordering::SeqCst), 2);
    assert_eq!(surface.strokes().len(), 2);
}
