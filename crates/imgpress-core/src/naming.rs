//! Collision-safe generated file names.
//!
//! Names are `{unix_millis}-{random u32}` so they sort by upload time while a
//! random draw separates uploads landing in the same millisecond. The scheme
//! is probabilistic, not a strict guarantee; acceptable at this scale.

use rand::Rng;

fn unique_stem() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let random: u32 = rand::rng().random_range(0..1_000_000_000);
    format!("{millis}-{random}")
}

/// Name for a file staged to temporary storage, keeping the original
/// extension so the on-disk temp file stays identifiable.
pub fn staged_file_name(original_extension: &str) -> String {
    let ext = original_extension.trim_start_matches('.').to_lowercase();
    if ext.is_empty() {
        unique_stem()
    } else {
        format!("{}.{}", unique_stem(), ext)
    }
}

/// Name for a processed asset. Output format is always WebP.
pub fn processed_file_name() -> String {
    format!("{}.webp", unique_stem())
}

/// Extract a lowercase extension from a client-supplied filename, stripped of
/// any path components. Returns empty string when there is none.
pub fn extension_of(filename: &str) -> String {
    std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}
