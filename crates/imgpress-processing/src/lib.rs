//! Imgpress Processing Library
//!
//! The image transformation pipeline: decode, auto-orient, resize to a
//! maximum width, re-encode to WebP, persist, and clean up the staged input
//! on every exit path.

pub mod encode;
pub mod orientation;
pub mod pipeline;
pub mod resize;

// Re-export commonly used types
pub use pipeline::{ImagePipeline, ProcessingError};
