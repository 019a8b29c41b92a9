//! Static retrieval of processed assets.
//!
//! Serves files from the permanent storage root by generated filename. At
//! scale this belongs on a CDN; the handler is the origin behavior.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use imgpress_core::AppError;
use imgpress_processing::encode::OUTPUT_CONTENT_TYPE;

use crate::error::HttpError;
use crate::state::AppState;

/// `GET {public prefix}/{file_name}` — serve a processed asset.
#[tracing::instrument(skip(state), fields(operation = "get_media_file"))]
pub async fn get_media_file(
    Path(file_name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, HttpError> {
    // Traversal attempts are rejected by the storage key validation.
    let data = state.storage.download(&file_name).await?;

    // Processed assets are immutable: cache aggressively.
    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, OUTPUT_CONTENT_TYPE)
        .header(header::CACHE_CONTROL, "public, max-age=31536000, immutable")
        .body(Body::from(data))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpError::from(AppError::Internal(e.to_string()))
        })?;

    Ok(response)
}
