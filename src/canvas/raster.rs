use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage, imageops};

use super::Background;
use crate::error::ExportError;
use crate::stroke::Stroke;

const PAPER: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Flatten white paper, the background and all strokes into one image
pub fn flatten<'a>(
    size: [u32; 2],
    background: Option<&Background>,
    strokes: impl IntoIterator<Item = &'a Stroke>,
) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(size[0], size[1], PAPER);

    if let Some(background) = background {
        imageops::overlay(&mut canvas, &background.scaled(), 0, 0);
    }

    for stroke in strokes {
        draw_stroke(&mut canvas, stroke);
    }

    canvas
}

/// Encode a flattened canvas in the given format
pub fn encode(image: &RgbaImage, format: ImageFormat) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    // Formats like JPEG reject an alpha channel
    let dynamic = match format {
        ImageFormat::Png | ImageFormat::WebP | ImageFormat::Tiff => {
            DynamicImage::ImageRgba8(image.clone())
        }
        _ => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image.clone()).to_rgb8()),
    };
    dynamic.write_to(&mut Cursor::new(&mut bytes), format)?;
    Ok(bytes)
}

fn draw_stroke(canvas: &mut RgbaImage, stroke: &Stroke) {
    let color = Rgba(stroke.color().to_array());
    let radius = (stroke.thickness() / 2.0).max(0.5);

    for segment in stroke.points().windows(2) {
        let (start, end) = (segment[0], segment[1]);
        let length = start.distance(end);
        // Stamp often enough that neighbouring dabs overlap
        let steps = (length * 2.0).ceil().max(1.0) as u32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let center = start.lerp(end, t);
            stamp(canvas, center.x, center.y, radius, color);
        }
    }
}

// Round dab, clipped to the canvas
fn stamp(canvas: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    let (width, height) = (canvas.width() as i64, canvas.height() as i64);
    let min_x = ((cx - radius).floor() as i64).max(0);
    let max_x = ((cx + radius).ceil() as i64).min(width - 1);
    let min_y = ((cy - radius).floor() as i64).max(0);
    let max_y = ((cy + radius).ceil() as i64).min(height - 1);
    let radius_sq = radius * radius;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= radius_sq {
                canvas.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Color32, Pos2};

    #[test]
    fn test_blank_canvas_is_white() {
        let image = flatten([80, 60], None, std::iter::empty());
        assert_eq!(image.dimensions(), (80, 60));
        assert!(image.pixels().all(|p| *p == PAPER));
    }

    #[test]
    fn test_stroke_is_rasterized() {
        let stroke = Stroke::new(
            Color32::RED,
            6.0,
            vec![Pos2::new(10.0, 30.0), Pos2::new(70.0, 30.0)],
        );
        let image = flatten([80, 60], None, [&stroke]);

        assert_eq!(*image.get_pixel(40, 30), Rgba([255, 0, 0, 255]));
        assert_eq!(*image.get_pixel(40, 5), PAPER);
    }

    #[test]
    fn test_strokes_outside_canvas_are_clipped() {
        let stroke = Stroke::new(
            Color32::RED,
            10.0,
            vec![Pos2::new(-50.0, -50.0), Pos2::new(500.0, 500.0)],
        );
        let image = flatten([80, 60], None, [&stroke]);
        assert_eq!(image.dimensions(), (80, 60));
        assert_eq!(*image.get_pixel(30, 30), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_encoded_png_decodes_to_same_size() {
        let image = flatten([80, 60], None, std::iter::empty());
        let bytes = encode(&image, ImageFormat::Png).unwrap();
        assert!(!bytes.is_empty());

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (80, 60));
    }
}
