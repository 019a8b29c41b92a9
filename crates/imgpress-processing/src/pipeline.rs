//! Image pipeline: decode → orient → resize → encode → persist → cleanup.

use std::io::Cursor;
use std::sync::Arc;

use image::{GenericImageView, ImageReader};
use imgpress_core::{naming, ProcessedAsset};
use imgpress_storage::{StagedFile, Storage, StorageError};
use thiserror::Error;

use crate::{encode, orientation, resize};

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Invalid image data: {0}")]
    InvalidImage(String),

    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("Temp file error: {0}")]
    TempFile(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Processing task failed: {0}")]
    Task(String),
}

struct EncodedImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

/// The image processing pipeline.
///
/// Stateless across requests; the only shared resource is the permanent
/// storage behind the `Storage` trait.
#[derive(Clone)]
pub struct ImagePipeline {
    storage: Arc<dyn Storage>,
    max_width: u32,
    webp_quality: f32,
}

impl ImagePipeline {
    pub fn new(storage: Arc<dyn Storage>, max_width: u32, webp_quality: f32) -> Self {
        Self {
            storage,
            max_width,
            webp_quality,
        }
    }

    /// Process a staged upload into a permanent asset.
    ///
    /// Takes ownership of the staged file and releases it on every exit
    /// path: after a successful persist, and before any error propagates.
    /// This is the single cleanup point for temporary storage.
    pub async fn process(&self, staged: StagedFile) -> Result<ProcessedAsset, ProcessingError> {
        let outcome = self.run(&staged).await;

        if let Err(e) = &outcome {
            tracing::warn!(
                temp_file = %staged.file_name(),
                error = %e,
                "Pipeline failed, discarding staged file"
            );
        }
        staged.discard().await;

        outcome
    }

    async fn run(&self, staged: &StagedFile) -> Result<ProcessedAsset, ProcessingError> {
        let data = staged
            .read()
            .await
            .map_err(|e| ProcessingError::TempFile(e.to_string()))?;

        let max_width = self.max_width;
        let quality = self.webp_quality;

        // Decode/orient/resize/encode are CPU-bound; keep them off the
        // async worker threads.
        let encoded = tokio::task::spawn_blocking(move || {
            transform(&data, max_width, quality)
        })
        .await
        .map_err(|e| ProcessingError::Task(e.to_string()))??;

        let file_name = naming::processed_file_name();
        let size_bytes = encoded.bytes.len() as u64;

        let (storage_key, url) = self
            .storage
            .upload(&file_name, encode::OUTPUT_CONTENT_TYPE, encoded.bytes)
            .await?;

        tracing::info!(
            file_name = %file_name,
            width = encoded.width,
            height = encoded.height,
            size_bytes,
            "Image processed"
        );

        Ok(ProcessedAsset {
            file_name,
            storage_key,
            url,
            width: encoded.width,
            height: encoded.height,
            size_bytes,
        })
    }
}

/// The synchronous core: decode with content-based format detection, apply
/// EXIF orientation, cap the width, and re-encode to WebP.
///
/// Decoding doubles as content verification: bytes that are not a real image
/// fail here no matter what MIME type the client declared.
fn transform(data: &[u8], max_width: u32, quality: f32) -> Result<EncodedImage, ProcessingError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ProcessingError::InvalidImage(e.to_string()))?;
    let img = reader
        .decode()
        .map_err(|e| ProcessingError::InvalidImage(e.to_string()))?;

    let img = orientation::auto_orient(img, data);
    let img = resize::fit_to_max_width(img, max_width);
    let (width, height) = img.dimensions();

    let bytes = encode::encode_webp(&img, quality).map_err(ProcessingError::Encode)?;

    Ok(EncodedImage {
        bytes,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use imgpress_storage::{LocalStorage, Staging};
    use tempfile::tempdir;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([5, 10, 15, 255])));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    async fn pipeline_fixture() -> (tempfile::TempDir, tempfile::TempDir, Staging, ImagePipeline) {
        let temp_dir = tempdir().unwrap();
        let media_dir = tempdir().unwrap();
        let staging = Staging::new(temp_dir.path()).await.unwrap();
        let storage = LocalStorage::new(media_dir.path(), "/uploads/images".to_string())
            .await
            .unwrap();
        let pipeline = ImagePipeline::new(Arc::new(storage), 1200, 80.0);
        (temp_dir, media_dir, staging, pipeline)
    }

    #[tokio::test]
    async fn test_process_wide_image_caps_width_and_cleans_temp() {
        let (temp_dir, media_dir, staging, pipeline) = pipeline_fixture().await;

        let staged = staging
            .stage("big.png", &png_bytes(2000, 1000))
            .await
            .unwrap();
        let temp_path = staged.path().to_path_buf();

        let asset = pipeline.process(staged).await.unwrap();

        assert_eq!(asset.width, 1200);
        assert_eq!(asset.height, 600);
        assert!(asset.file_name.ends_with(".webp"));
        assert_eq!(asset.url, format!("/uploads/images/{}", asset.file_name));

        // Temp file is gone, permanent file exists and is WebP.
        assert!(!temp_path.exists());
        let out = std::fs::read(media_dir.path().join(&asset.file_name)).unwrap();
        assert_eq!(&out[8..12], b"WEBP");

        // Temp root is empty again.
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_process_small_image_is_not_upscaled() {
        let (_temp_dir, _media_dir, staging, pipeline) = pipeline_fixture().await;

        let staged = staging
            .stage("small.png", &png_bytes(640, 480))
            .await
            .unwrap();
        let asset = pipeline.process(staged).await.unwrap();

        assert_eq!(asset.width, 640);
        assert_eq!(asset.height, 480);
    }

    #[tokio::test]
    async fn test_process_garbage_fails_and_still_cleans_temp() {
        let (temp_dir, media_dir, staging, pipeline) = pipeline_fixture().await;

        let staged = staging
            .stage("fake.jpg", b"definitely not an image")
            .await
            .unwrap();
        let temp_path = staged.path().to_path_buf();

        let result = pipeline.process(staged).await;
        assert!(matches!(result, Err(ProcessingError::InvalidImage(_))));

        // Cleanup ran on the failure path too, and nothing was persisted.
        assert!(!temp_path.exists());
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
        assert_eq!(std::fs::read_dir(media_dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_output_format_is_webp_regardless_of_input() {
        let (_temp_dir, media_dir, staging, pipeline) = pipeline_fixture().await;

        // JPEG input
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(80, 60, Rgba([9, 9, 9, 255])));
        let mut jpeg = Vec::new();
        img.to_rgb8()
            .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .unwrap();

        let staged = staging.stage("photo.jpg", &jpeg).await.unwrap();
        let asset = pipeline.process(staged).await.unwrap();

        let out = std::fs::read(media_dir.path().join(&asset.file_name)).unwrap();
        assert_eq!(&out[0..4], b"RIFF");
        assert_eq!(&out[8..12], b"WEBP");
    }
}
