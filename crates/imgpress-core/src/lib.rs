//! Imgpress Core Library
//!
//! Shared building blocks for the imgpress upload service: configuration,
//! the error taxonomy, domain models, and collision-safe name generation.

pub mod config;
pub mod error;
pub mod models;
pub mod naming;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::ProcessedAsset;
pub use naming::{processed_file_name, staged_file_name};
