//! Imgpress Storage Library
//!
//! Storage abstraction and implementations for the upload service.
//!
//! Two distinct roots are involved and never mixed:
//!
//! - **Temporary storage** (`staging` module): where raw upload bytes land
//!   under a collision-safe name before any processing. A staged file is
//!   owned by the request that created it and must not outlive it.
//! - **Permanent storage** (`Storage` trait + `LocalStorage`): where the
//!   processed assets live and are served from.
//!
//! Keys must not contain `..` or a leading `/`; resolution is validated in
//! the backend so a crafted key can never escape the storage root.

pub mod local;
pub mod staging;
pub mod traits;

// Re-export commonly used types
pub use local::LocalStorage;
pub use staging::{StagedFile, Staging};
pub use traits::{Storage, StorageError, StorageResult};
