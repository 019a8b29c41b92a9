//! Configuration module
//!
//! Environment-driven configuration for the upload service. Every knob has a
//! working default so the service starts with no environment at all.

use std::env;

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_RESIZE_MAX_WIDTH: u32 = 1200;
const DEFAULT_WEBP_QUALITY: f32 = 80.0;
const DEFAULT_TEMP_STORAGE_PATH: &str = "uploads/temp";
const DEFAULT_MEDIA_STORAGE_PATH: &str = "uploads/images";
const DEFAULT_PUBLIC_URL_PREFIX: &str = "/uploads/images";

/// Service configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    // Storage configuration
    pub temp_storage_path: String,
    pub media_storage_path: String,
    pub public_url_prefix: String,
    // Upload constraints
    pub max_file_size_bytes: usize,
    pub allowed_content_types: Vec<String>,
    // Processing configuration
    pub resize_max_width: u32,
    pub webp_quality: f32,
    // HTTP response compression (gzip)
    pub response_compression: bool,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let allowed_content_types = env::var("ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| "image/jpeg,image/png,image/webp".to_string())
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let max_file_size_bytes = env::var("MAX_FILE_SIZE_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_FILE_SIZE_BYTES);

        let webp_quality: f32 = env::var("WEBP_QUALITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_WEBP_QUALITY);
        if !(1.0..=100.0).contains(&webp_quality) {
            anyhow::bail!("WEBP_QUALITY must be between 1 and 100, got {webp_quality}");
        }

        let resize_max_width = env::var("RESIZE_MAX_WIDTH")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_RESIZE_MAX_WIDTH);
        if resize_max_width == 0 {
            anyhow::bail!("RESIZE_MAX_WIDTH must be greater than zero");
        }

        Ok(Config {
            server_port: env::var("PORT")
                .or_else(|_| env::var("SERVER_PORT"))
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            cors_origins,
            environment,
            temp_storage_path: env::var("TEMP_STORAGE_PATH")
                .unwrap_or_else(|_| DEFAULT_TEMP_STORAGE_PATH.to_string()),
            media_storage_path: env::var("MEDIA_STORAGE_PATH")
                .unwrap_or_else(|_| DEFAULT_MEDIA_STORAGE_PATH.to_string()),
            public_url_prefix: env::var("PUBLIC_URL_PREFIX")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_PUBLIC_URL_PREFIX.to_string()),
            max_file_size_bytes,
            allowed_content_types,
            resize_max_width,
            webp_quality,
            response_compression: env::var("RESPONSE_COMPRESSION")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),
        })
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn max_file_size_mb(&self) -> usize {
        self.max_file_size_bytes / 1024 / 1024
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_port: DEFAULT_SERVER_PORT,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            temp_storage_path: DEFAULT_TEMP_STORAGE_PATH.to_string(),
            media_storage_path: DEFAULT_MEDIA_STORAGE_PATH.to_string(),
            public_url_prefix: DEFAULT_PUBLIC_URL_PREFIX.to_string(),
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            allowed_content_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/webp".to_string(),
            ],
            resize_max_width: DEFAULT_RESIZE_MAX_WIDTH,
            webp_quality: DEFAULT_WEBP_QUALITY,
            response_compression: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.max_file_size_bytes, 5 * 1024 * 1024);
        assert_eq!(config.resize_max_width, 1200);
        assert_eq!(config.webp_quality, 80.0);
        assert_eq!(config.allowed_content_types.len(), 3);
        assert!(!config.is_production());
    }

    #[test]
    fn test_is_production_matches_prod_aliases() {
        let mut config = Config::default();
        for env in ["production", "PRODUCTION", "prod"] {
            config.environment = env.to_string();
            assert!(config.is_production());
        }
        config.environment = "staging".to_string();
        assert!(!config.is_production());
    }

    #[test]
    fn test_max_file_size_mb() {
        let config = Config::default();
        assert_eq!(config.max_file_size_mb(), 5);
    }

    #[test]
    fn test_public_url_prefix_has_no_trailing_slash() {
        let config = Config::default();
        assert!(!config.public_url_prefix.ends_with('/'));
    }
}
