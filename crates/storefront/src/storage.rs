//! Key-value persistence for cart, catalog cache, and ratings.
//!
//! Storage is an opaque string-to-string map, mirroring how the shop pages
//! treat browser storage. [`FileStore`] keeps one file per key under a data
//! directory; [`MemoryStore`] backs tests. Writes that fail are logged and
//! swallowed; reads of missing or corrupt values come back as `None` so
//! callers degrade to empty state instead of surfacing parse errors.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StorageError;

/// Fixed storage keys shared by the stores.
pub mod keys {
    use fasco_core::ProductId;

    /// Persisted cart: a JSON array of cart items.
    pub const CART: &str = "cart";

    /// Persisted catalog cache: a JSON array of products, overwritten
    /// wholesale on each successful fetch.
    pub const PRODUCTS: &str = "products";

    /// Per-product rating record.
    #[must_use]
    pub fn ratings(id: ProductId) -> String {
        format!("ratings_{id}")
    }
}

/// String key-value storage.
///
/// Implementations are infallible from the caller's perspective: a failed
/// write is logged, a failed read is an absent value.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any existing value.
    fn set(&self, key: &str, value: &str);

    /// Delete the value under `key`, if any.
    fn remove(&self, key: &str);
}

/// Shared handle to a store, cloned into every component that persists.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Read and deserialize a JSON value, treating corrupt data as absent.
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, error = %err, "Discarding corrupt persisted value");
            None
        }
    }
}

/// Serialize and store a JSON value.
pub fn write_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, &raw),
        Err(err) => tracing::warn!(key, error = %err, "Failed to serialize value for storage"),
    }
}

// =============================================================================
// FileStore
// =============================================================================

/// File-backed store: one JSON file per key under a data directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(key, error = %err, "Failed to read stored value");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = fs::write(self.path_for(key), value) {
            tracing::warn!(key, error = %err, "Failed to persist value");
        }
    }

    fn remove(&self, key: &str) {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => tracing::warn!(key, error = %err, "Failed to remove stored value"),
        }
    }
}

/// Map a storage key to a safe file name.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

// =============================================================================
// MemoryStore
// =============================================================================

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store already wrapped for sharing.
    #[must_use]
    pub fn shared() -> SharedStore {
        Arc::new(Self::new())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .map(|entries| entries.get(key).cloned())
            .unwrap_or_default()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("cart"), None);
        store.set("cart", "[]");
        assert_eq!(store.get("cart").as_deref(), Some("[]"));
        store.remove("cart");
        assert_eq!(store.get("cart"), None);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        store.set("products", r#"[{"id":1}]"#);
        assert_eq!(store.get("products").as_deref(), Some(r#"[{"id":1}]"#));

        // A second store over the same directory sees the value.
        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("products").as_deref(), Some(r#"[{"id":1}]"#));

        reopened.remove("products");
        assert_eq!(store.get("products"), None);
    }

    #[test]
    fn test_keys_sanitize_to_file_names() {
        assert_eq!(sanitize_key("ratings_12"), "ratings_12");
        assert_eq!(sanitize_key("../escape"), "___escape");
    }

    #[test]
    fn test_read_json_discards_corrupt_values() {
        let store = MemoryStore::new();
        store.set("cart", "{not json");
        let cart: Option<Vec<i32>> = read_json(&store, "cart");
        assert_eq!(cart, None);
    }

    #[test]
    fn test_json_helpers_roundtrip() {
        let store = MemoryStore::new();
        write_json(&store, "cart", &vec![1, 2, 3]);
        let back: Option<Vec<i32>> = read_json(&store, "cart");
        assert_eq!(back, Some(vec![1, 2, 3]));
    }
}
