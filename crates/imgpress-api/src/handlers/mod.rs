pub mod health;
pub mod media_get;
pub mod upload_image;

pub use health::health;
pub use media_get::get_media_file;
pub use upload_image::upload_image;
