//! Imgpress API
//!
//! HTTP surface for the upload service: the upload endpoint, static
//! retrieval of processed assets, and server wiring.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use setup::initialize_app;
pub use state::AppState;
