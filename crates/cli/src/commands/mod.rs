//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod rate;
pub mod shop;

use std::sync::Arc;

use fasco_storefront::catalog::CatalogClient;
use fasco_storefront::config::StorefrontConfig;
use fasco_storefront::error::AppError;
use fasco_storefront::storage::{FileStore, SharedStore};

/// Shared command context: config, persistent store, catalog client.
pub struct Context {
    pub config: StorefrontConfig,
    pub store: SharedStore,
    pub catalog: CatalogClient,
}

impl Context {
    /// Build the context from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError` when configuration is invalid or the data
    /// directory cannot be created.
    pub fn from_env() -> Result<Self, AppError> {
        let config = StorefrontConfig::from_env()?;
        let store: SharedStore = Arc::new(FileStore::open(&config.data_dir)?);
        let catalog = CatalogClient::new(config.api_url.clone(), store.clone());
        Ok(Self {
            config,
            store,
            catalog,
        })
    }
}
