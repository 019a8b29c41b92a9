//! EXIF orientation handling.
//!
//! Cameras store rotated pixel data plus an orientation tag; the decoded
//! buffer must be transformed so the image is right-side-up before resizing.
//! The tag itself is discarded along with all other metadata when the image
//! is re-encoded.

use image::{imageops, DynamicImage};
use std::io::Cursor;

/// Read the EXIF orientation tag (1-8) from raw image bytes.
///
/// Returns 1 (normal) when the image carries no EXIF data or no orientation
/// tag.
pub fn read_exif_orientation(data: &[u8]) -> u8 {
    let mut cursor = Cursor::new(data);
    let Ok(exif) = exif::Reader::new().read_from_container(&mut cursor) else {
        return 1;
    };

    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .filter(|v| (1..=8u32).contains(v))
        .map(|v| v as u8)
        .unwrap_or(1)
}

/// Get rotation and flip operations needed for a given EXIF orientation.
/// Returns (rotate_angle, flip_horizontal, flip_vertical); the rotation is
/// applied before the flips.
pub fn orientation_transforms(orientation: u8) -> (Option<u16>, bool, bool) {
    match orientation {
        1 => (None, false, false),      // Normal
        2 => (None, true, false),       // Mirror horizontal
        3 => (Some(180), false, false), // Rotate 180
        4 => (None, false, true),       // Mirror vertical
        5 => (Some(90), true, false),   // Transpose: rotate 90 CW, then mirror horizontal
        6 => (Some(90), false, false),  // Rotate 90 CW
        7 => (Some(270), true, false),  // Transverse: rotate 270 CW, then mirror horizontal
        8 => (Some(270), false, false), // Rotate 270 CW
        _ => (None, false, false),      // Invalid, treat as normal
    }
}

/// Apply the orientation stored in `data`'s EXIF block to an already-decoded
/// image, returning an upright pixel buffer.
pub fn auto_orient(mut img: DynamicImage, data: &[u8]) -> DynamicImage {
    let orientation = read_exif_orientation(data);
    if orientation == 1 {
        return img;
    }

    let (rotate, flip_h, flip_v) = orientation_transforms(orientation);

    tracing::debug!(
        orientation = orientation,
        rotate = ?rotate,
        flip_horizontal = flip_h,
        flip_vertical = flip_v,
        "Applying EXIF orientation"
    );

    if let Some(angle) = rotate {
        img = rotate_by_angle(img, angle);
    }
    if flip_h {
        img = DynamicImage::ImageRgba8(imageops::flip_horizontal(&img.to_rgba8()));
    }
    if flip_v {
        img = DynamicImage::ImageRgba8(imageops::flip_vertical(&img.to_rgba8()));
    }

    img
}

/// Rotate image by 90, 180, or 270 degrees clockwise.
fn rotate_by_angle(img: DynamicImage, angle: u16) -> DynamicImage {
    match angle {
        90 => DynamicImage::ImageRgba8(imageops::rotate90(&img.to_rgba8())),
        180 => DynamicImage::ImageRgba8(imageops::rotate180(&img.to_rgba8())),
        270 => DynamicImage::ImageRgba8(imageops::rotate270(&img.to_rgba8())),
        _ => img,
    }
}
