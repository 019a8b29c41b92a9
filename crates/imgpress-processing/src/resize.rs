//! Max-width resizing.
//!
//! The pipeline constrains output width to a configured maximum while
//! preserving aspect ratio. Images already within the limit pass through
//! untouched; upscaling is never performed.

use image::{DynamicImage, GenericImageView};

/// Calculate the output dimensions for fitting into `max_width`.
///
/// Returns the original dimensions when no resize is needed.
pub fn fit_dimensions(orig_width: u32, orig_height: u32, max_width: u32) -> (u32, u32) {
    if orig_width <= max_width {
        return (orig_width, orig_height);
    }

    let aspect_ratio = orig_height as f32 / orig_width as f32;
    let new_height = (max_width as f32 * aspect_ratio).round() as u32;
    (max_width, new_height.max(1))
}

/// Select a filter based on how aggressively the image is being downscaled.
/// Heavy reductions get a cheaper filter; mild ones get Lanczos3.
fn select_filter(orig_width: u32, new_width: u32) -> image::imageops::FilterType {
    let ratio = orig_width as f32 / new_width as f32;

    if ratio > 2.0 {
        image::imageops::FilterType::Triangle
    } else if ratio > 1.5 {
        image::imageops::FilterType::CatmullRom
    } else {
        image::imageops::FilterType::Lanczos3
    }
}

/// Resize the image so its width does not exceed `max_width`, preserving
/// aspect ratio. Never upscales.
pub fn fit_to_max_width(img: DynamicImage, max_width: u32) -> DynamicImage {
    let (orig_width, orig_height) = img.dimensions();
    let (new_width, new_height) = fit_dimensions(orig_width, orig_height, max_width);

    if (new_width, new_height) == (orig_width, orig_height) {
        return img;
    }

    let filter = select_filter(orig_width, new_width);
    img.resize_exact(new_width, new_height, filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_narrow_image_is_not_upscaled() {
        assert_eq!(fit_dimensions(800, 600, 1200), (800, 600));
        assert_eq!(fit_dimensions(1200, 900, 1200), (1200, 900));
    }

    #[test]
    fn test_wide_image_is_capped_with_aspect_preserved() {
        assert_eq!(fit_dimensions(2000, 1000, 1200), (1200, 600));
        assert_eq!(fit_dimensions(2400, 1600, 1200), (1200, 800));
    }

    #[test]
    fn test_extreme_aspect_ratio_never_yields_zero_height() {
        let (w, h) = fit_dimensions(100_000, 1, 1200);
        assert_eq!(w, 1200);
        assert_eq!(h, 1);
    }

    #[test]
    fn test_fit_to_max_width_resizes_pixels() {
        let img =
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(2000, 1000, Rgba([10, 20, 30, 255])));
        let resized = fit_to_max_width(img, 1200);
        assert_eq!(resized.dimensions(), (1200, 600));
    }

    #[test]
    fn test_fit_to_max_width_passes_small_image_through() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(640, 480, Rgba([1, 2, 3, 255])));
        let resized = fit_to_max_width(img, 1200);
        assert_eq!(resized.dimensions(), (640, 480));
    }
}
