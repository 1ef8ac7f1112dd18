//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `FASCO_API_URL` - Catalog endpoint (default: `http://localhost:3000/products`)
//! - `FASCO_DATA_DIR` - Data directory for persisted state (default: `.fasco`)
//! - `FASCO_PAGE_SIZE` - Products per listing page (default: 9)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:3000/products";
const DEFAULT_DATA_DIR: &str = ".fasco";
const DEFAULT_PAGE_SIZE: usize = 9;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog endpoint serving the product collection as JSON
    pub api_url: Url,
    /// Directory holding persisted cart, catalog cache, and ratings
    pub data_dir: PathBuf,
    /// Products per listing page
    pub page_size: usize,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(&get_env_or_default("FASCO_API_URL", DEFAULT_API_URL))?;
        let data_dir = PathBuf::from(get_env_or_default("FASCO_DATA_DIR", DEFAULT_DATA_DIR));
        let page_size = parse_page_size(&std::env::var("FASCO_PAGE_SIZE").unwrap_or_default())?;

        Ok(Self {
            api_url,
            data_dir,
            page_size,
        })
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        // The compiled-in default is a valid URL
        #[allow(clippy::unwrap_used)]
        let api_url = Url::parse(DEFAULT_API_URL).unwrap();
        Self {
            api_url,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_api_url(value: &str) -> Result<Url, ConfigError> {
    Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar("FASCO_API_URL".to_string(), e.to_string()))
}

/// Parse the page size; an empty value means the default.
fn parse_page_size(value: &str) -> Result<usize, ConfigError> {
    if value.is_empty() {
        return Ok(DEFAULT_PAGE_SIZE);
    }
    match value.parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        Ok(_) => Err(ConfigError::InvalidEnvVar(
            "FASCO_PAGE_SIZE".to_string(),
            "must be at least 1".to_string(),
        )),
        Err(e) => Err(ConfigError::InvalidEnvVar(
            "FASCO_PAGE_SIZE".to_string(),
            e.to_string(),
        )),
    }
}
