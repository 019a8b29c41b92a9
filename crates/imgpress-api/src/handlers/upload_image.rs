//! Upload image handler
//!
//! Validates the multipart request, stages the raw bytes to temporary
//! storage, and delegates to the processing pipeline. Metadata persistence
//! (owner, original filename, audit trail) is deliberately out of scope; the
//! response carries everything an external store would need.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use imgpress_core::AppError;
use serde::Serialize;

use crate::error::HttpError;
use crate::extract::{extract_upload_file, validate_content_type, validate_file_size};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadData {
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub url: String,
}

/// Success body: `{ "success": true, "message": ..., "data": { "fileName", "url" } }`
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub data: UploadData,
}

/// `POST /api/upload-image` — single file field named `file`.
///
/// # Errors
/// - `MissingFile` (400) - no `file` field in the form
/// - `InvalidFileType` (400) - declared MIME outside the allow-list
/// - `FileTooLarge` (413) - byte size over the ceiling
/// - `Processing`/`Storage` (500) - pipeline failure (temp file still cleaned up)
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_image"))]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpError> {
    let file = extract_upload_file(multipart).await?;

    // Validation happens before staging; a rejected upload writes nothing.
    validate_content_type(&file.content_type, &state.config.allowed_content_types)?;
    validate_file_size(file.data.len(), state.config.max_file_size_bytes)?;

    tracing::debug!(
        original_filename = %file.original_filename,
        content_type = %file.content_type,
        size_bytes = file.data.len(),
        "Upload accepted, staging"
    );

    let staged = state
        .staging
        .stage(&file.original_filename, &file.data)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    // The pipeline owns the staged file from here: it is removed on every
    // exit path, success or failure.
    let asset = state.pipeline.process(staged).await?;

    Ok(Json(UploadResponse {
        success: true,
        message: "Upload successful".to_string(),
        data: UploadData {
            file_name: asset.file_name,
            url: asset.url,
        },
    }))
}
