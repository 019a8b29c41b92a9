//! Application initialization: storage, pipeline, and routes.

pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use imgpress_core::Config;
use imgpress_processing::ImagePipeline;
use imgpress_storage::{LocalStorage, Staging, Storage};

use crate::state::AppState;

/// Build the application state and router from configuration.
///
/// Both storage roots are created here if absent (idempotent), so the service
/// comes up cleanly on an empty filesystem.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router)> {
    let staging = Staging::new(&config.temp_storage_path).await?;

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(&config.media_storage_path, config.public_url_prefix.clone()).await?,
    );

    let pipeline = ImagePipeline::new(
        storage.clone(),
        config.resize_max_width,
        config.webp_quality,
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        staging,
        storage,
        pipeline,
    });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
