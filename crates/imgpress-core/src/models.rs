//! Domain models shared across the upload pipeline.

use serde::Serialize;

/// The permanent output of a successful upload.
///
/// Created exactly once by the processing pipeline and immutable afterwards.
/// Carries everything an external metadata store (not part of this service)
/// would need to record the upload.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedAsset {
    /// Generated output filename, e.g. `1724400000000-383172649.webp`
    pub file_name: String,
    /// Storage key under the permanent root
    pub storage_key: String,
    /// Public retrieval URL (prefix + filename)
    pub url: String,
    /// Output width in pixels after resizing
    pub width: u32,
    /// Output height in pixels after resizing
    pub height: u32,
    /// Encoded size in bytes
    pub size_bytes: u64,
}
