use egui::{ColorImage, Vec2};
use image::RgbaImage;
use image::imageops::{self, FilterType};

/// How a background image is mapped onto the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Uniform scale so the whole image fits, no cropping or distortion
    #[default]
    Contain,
    /// Pixel for pixel, cropped by the canvas edges
    Actual,
}

impl FitMode {
    /// Scale factor for an image of `image_size` on a canvas of `canvas_size`
    pub fn scale(self, canvas_size: [u32; 2], image_size: [u32; 2]) -> f32 {
        match self {
            FitMode::Contain => {
                let sx = canvas_size[0] as f32 / image_size[0] as f32;
                let sy = canvas_size[1] as f32 / image_size[1] as f32;
                sx.min(sy)
            }
            FitMode::Actual => 1.0,
        }
    }
}

/// Background photo, anchored at the canvas' top-left corner
#[derive(Clone)]
pub struct Background {
    image: RgbaImage,
    scale: f32,
}

impl std::fmt::Debug for Background {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Background")
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("scale", &self.scale)
            .finish()
    }
}

impl Background {
    pub fn new(image: RgbaImage, canvas_size: [u32; 2], fit: FitMode) -> Self {
        let scale = fit.scale(canvas_size, [image.width(), image.height()]);
        Self { image, scale }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// On-canvas size after scaling
    pub fn display_size(&self) -> Vec2 {
        Vec2::new(
            self.image.width() as f32 * self.scale,
            self.image.height() as f32 * self.scale,
        )
    }

    /// The image resampled to its on-canvas size
    pub fn scaled(&self) -> RgbaImage {
        let size = self.display_size();
        let width = (size.x.round() as u32).max(1);
        let height = (size.y.round() as u32).max(1);
        if width == self.image.width() && height == self.image.height() {
            return self.image.clone();
        }
        imageops::resize(&self.image, width, height, FilterType::Triangle)
    }

    /// Pixels for the GPU: the fitted image, shrunk further if a side exceeds `max_side`
    pub fn to_color_image(&self, max_side: u32) -> ColorImage {
        let mut pixels = self.scaled();
        let longest = pixels.width().max(pixels.height());
        if longest > max_side {
            let fit = |side: u32| {
                ((u64::from(side) * u64::from(max_side) / u64::from(longest)) as u32).max(1)
            };
            let (width, height) = (fit(pixels.width()), fit(pixels.height()));
            pixels = imageops::resize(&pixels, width, height, FilterType::Triangle);
        }
        let size = [pixels.width() as usize, pixels.height() as usize];
        ColorImage::from_rgba_unmultiplied(size, pixels.as_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_contain_uses_smaller_ratio() {
        assert_eq!(FitMode::Contain.scale([800, 600], [1600, 600]), 0.5);
        assert_eq!(FitMode::Contain.scale([800, 600], [400, 1200]), 0.5);
        assert_eq!(FitMode::Contain.scale([800, 600], [400, 300]), 2.0);
    }

    #[test]
    fn test_actual_never_scales() {
        assert_eq!(FitMode::Actual.scale([800, 600], [1600, 1200]), 1.0);
    }

    #[test]
    fn test_scaled_fits_canvas() {
        let image = RgbaImage::from_pixel(1600, 600, Rgba([0, 0, 255, 255]));
        let background = Background::new(image, [800, 600], FitMode::Contain);

        let scaled = background.scaled();
        assert_eq!(scaled.dimensions(), (800, 300));
        assert_eq!(background.display_size(), Vec2::new(800.0, 300.0));
    }

    #[test]
    fn test_texture_never_exceeds_display_size() {
        let background = Background::new(RgbaImage::new(9000, 6000), [800, 600], FitMode::Contain);
        let texture = background.to_color_image(16384);
        let display = background.display_size();

        assert!(texture.size[0] as f32 <= display.x.ceil());
        assert!(texture.size[1] as f32 <= display.y.ceil());
        assert_eq!(texture.size, [800, 533]);
    }

    #[test]
    fn test_texture_respects_gpu_limit() {
        let background = Background::new(RgbaImage::new(9000, 3000), [800, 600], FitMode::Actual);
        let texture = background.to_color_image(4096);

        assert_eq!(texture.size, [4096, 1365]);
        // Drawn at full size regardless of the texture resolution
        assert_eq!(background.display_size(), Vec2::new(9000.0, 3000.0));
    }
}
