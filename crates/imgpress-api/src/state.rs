//! Application state shared across handlers.

use std::sync::Arc;

use imgpress_core::Config;
use imgpress_processing::ImagePipeline;
use imgpress_storage::{Staging, Storage};

pub struct AppState {
    pub config: Config,
    /// Temporary storage writer (staging area for raw uploads)
    pub staging: Staging,
    /// Permanent storage (processed assets are served from here)
    pub storage: Arc<dyn Storage>,
    pub pipeline: ImagePipeline,
}
