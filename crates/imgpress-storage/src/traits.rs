//! Storage abstraction trait
//!
//! This module defines the Storage trait that permanent storage backends must
//! implement. The processing pipeline works against the trait, so the local
//! filesystem backend can later be swapped for an object store or CDN origin
//! without touching the pipeline.

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Permanent storage abstraction.
///
/// The storage key is the backend-internal identifier for a file; the URL is
/// the public retrieval path built from the configured prefix.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write a processed file and return (storage_key, public_url).
    ///
    /// The destination directory is created if absent; creating it twice is
    /// not an error.
    async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<(String, String)>;

    /// Read a file by its storage key.
    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Delete a file by its storage key. Deleting a missing file is Ok.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check whether a file exists.
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;
}
