//! Shared fixtures for the storefront integration tests.
//!
//! Tests run fully offline: the catalog client points at a port nothing
//! listens on, so every fetch exercises the cache-fallback path against a
//! catalog seeded into storage beforehand.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use fasco_core::ProductId;
use fasco_storefront::catalog::CatalogClient;
use fasco_storefront::storage::{FileStore, SharedStore, keys, write_json};
use fasco_storefront::types::Product;
use rust_decimal::Decimal;
use tempfile::TempDir;
use url::Url;

/// A file store in a fresh temp directory. Keep the `TempDir` alive for the
/// duration of the test.
///
/// # Panics
///
/// Panics when the temp directory cannot be created.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn temp_file_store() -> (TempDir, SharedStore) {
    let dir = TempDir::new().unwrap();
    let store: SharedStore = Arc::new(FileStore::open(dir.path()).unwrap());
    (dir, store)
}

/// A catalog client whose endpoint is unreachable; all reads come from the
/// persisted cache.
///
/// # Panics
///
/// Never panics in practice; the endpoint literal is valid.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn offline_client(store: SharedStore) -> CatalogClient {
    CatalogClient::new(Url::parse("http://127.0.0.1:9/products").unwrap(), store)
}

/// Seed the persisted catalog cache.
pub fn seed_catalog(store: &SharedStore, products: &[Product]) {
    write_json(store.as_ref(), keys::PRODUCTS, &products.to_vec());
}

/// A baseline product; tests tweak fields as needed.
#[must_use]
pub fn product(id: i64, slug: &str, price: i64) -> Product {
    Product {
        id: ProductId::new(id),
        slug: slug.to_string(),
        title: format!("Product {id}"),
        brand: "Acme".to_string(),
        price: Decimal::from(price),
        discounted_price: None,
        colors: vec!["red".to_string(), "blue".to_string()],
        color_names: vec!["Red".to_string(), "Blue".to_string()],
        sizes: vec!["M".to_string(), "L".to_string()],
        images: vec![format!("{slug}.jpg")],
        image_url: None,
        tags: vec!["casual".to_string()],
        collection: None,
        category: None,
        status: None,
        ratings: None,
        created_at: None,
        sales_count: None,
    }
}

/// Twelve products spanning brands, sizes, collections, discounts, and
/// creation dates, enough to exercise two grid pages.
///
/// # Panics
///
/// Never panics in practice; the fixture dates are valid.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn sample_catalog() -> Vec<Product> {
    (1..=12i64)
        .map(|i| {
            let mut p = product(i, &format!("item-{i}"), 10 * i);
            p.created_at = Some(
                Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap()
                    + chrono::Duration::days(i),
            );
            p.sales_count = Some(u64::try_from(100 * i).unwrap());
            if i % 2 == 0 {
                p.brand = "Zeta".to_string();
            }
            if i % 3 == 0 {
                p.sizes = vec!["S".to_string()];
            }
            if i <= 4 {
                p.collection = Some("Summer".to_string());
            }
            if i == 5 {
                // half off the list price of 50
                p.discounted_price = Some(Decimal::from(25));
            }
            p
        })
        .collect()
}
