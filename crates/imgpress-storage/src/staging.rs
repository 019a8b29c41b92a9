//! Temporary staging of raw upload bytes.
//!
//! Uploads are never processed in the permanent root. Raw bytes land here
//! first under a collision-safe name, and the resulting [`StagedFile`] is
//! handed to the processing pipeline, which owns it from then on. The
//! pipeline releases it exactly once on every exit path via
//! [`StagedFile::discard`].

use crate::traits::{StorageError, StorageResult};
use imgpress_core::naming;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Writer for the temporary storage root.
#[derive(Clone)]
pub struct Staging {
    temp_root: PathBuf,
}

impl Staging {
    /// Create the staging area, ensuring the temp root exists.
    pub async fn new(temp_root: impl Into<PathBuf>) -> StorageResult<Self> {
        let temp_root = temp_root.into();

        fs::create_dir_all(&temp_root).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create temp directory {}: {}",
                temp_root.display(),
                e
            ))
        })?;

        Ok(Staging { temp_root })
    }

    /// Write raw upload bytes to the temp root under a generated name.
    ///
    /// One file is created per successful call. The original filename is used
    /// only for its extension; its path components are never trusted.
    pub async fn stage(&self, original_filename: &str, data: &[u8]) -> StorageResult<StagedFile> {
        let extension = naming::extension_of(original_filename);
        let file_name = naming::staged_file_name(&extension);
        let path = self.temp_root.join(&file_name);

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to create temp file {}: {}",
                path.display(),
                e
            ))
        })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to write temp file {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::debug!(
            path = %path.display(),
            size_bytes = data.len(),
            "Upload staged to temporary storage"
        );

        Ok(StagedFile { path, file_name })
    }
}

/// A file staged to temporary storage, owned by the request that created it.
///
/// The owner must call [`discard`](Self::discard) when done, success or
/// failure; discarding an already-removed file is not an error.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    file_name: String,
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Read the staged bytes back.
    pub async fn read(&self) -> StorageResult<Vec<u8>> {
        fs::read(&self.path).await.map_err(|e| {
            StorageError::DownloadFailed(format!(
                "Failed to read temp file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    /// Remove the staged file, consuming the descriptor.
    ///
    /// Checks existence first since the file may already be gone. A failed
    /// removal is logged, never propagated: cleanup must not mask the
    /// original pipeline outcome.
    pub async fn discard(self) {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return;
        }
        if let Err(e) = fs::remove_file(&self.path).await {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove staged file"
            );
        } else {
            tracing::debug!(path = %self.path.display(), "Staged file removed");
        }
    }
}
