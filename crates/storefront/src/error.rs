//! Storefront error types.
//!
//! Most failure modes are recovered where they happen (catalog fetches fall
//! back to the cache, corrupt persisted state loads as empty), so the public
//! surface is small: storage setup and configuration are the only operations
//! that surface errors to the caller.

use thiserror::Error;

use crate::config::ConfigError;

/// Persistent storage failure.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The data directory could not be created or accessed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application-level error for binaries built on this crate.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration failed to load.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Storage failed to open.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
