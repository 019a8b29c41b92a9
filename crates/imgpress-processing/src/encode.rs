//! WebP re-encoding.
//!
//! All output is lossy WebP at a configured quality. Re-encoding from the
//! decoded pixel buffer means no EXIF or other metadata survives into the
//! output, which is both a privacy and a size requirement.

use image::DynamicImage;

/// MIME type of every processed asset.
pub const OUTPUT_CONTENT_TYPE: &str = "image/webp";

/// Encode a decoded image to lossy WebP at the given quality (1-100).
pub fn encode_webp(img: &DynamicImage, quality: f32) -> Result<Vec<u8>, String> {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let encoder = webp::Encoder::from_rgba(&rgba, width, height);
    let webp_data = encoder
        .encode_simple(false, quality)
        .map_err(|e| format!("WebP encoding failed: {:?}", e))?;

    Ok(webp_data.to_vec())
}
