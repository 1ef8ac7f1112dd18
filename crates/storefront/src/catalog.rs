//! Catalog client with local cache fallback.
//!
//! Products come from an external HTTP endpoint serving a JSON array. Every
//! successful full fetch overwrites the persisted catalog cache wholesale;
//! any failure falls back to that cache (or an empty list), so callers never
//! see a network error - only an absence of data. Single-product lookups go
//! through a short-lived in-memory cache, then the persisted catalog, then
//! a direct remote fetch.

use std::sync::Arc;
use std::time::Duration;

use fasco_core::ProductId;
use moka::future::Cache;
use tracing::{debug, instrument};
use url::Url;

use crate::storage::{self, SharedStore, keys};
use crate::types::Product;

/// Catalog fetch failure. Internal: recovered at the client boundary.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Request failed before producing a response.
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("catalog endpoint returned {0}")]
    Status(reqwest::StatusCode),
}

/// Client for the product catalog endpoint.
///
/// Cheaply cloneable; single-product lookups are cached for 5 minutes.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    http: reqwest::Client,
    endpoint: Url,
    store: SharedStore,
    by_slug: Cache<String, Product>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(endpoint: Url, store: SharedStore) -> Self {
        let by_slug = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                http: reqwest::Client::new(),
                endpoint,
                store,
                by_slug,
            }),
        }
    }

    /// Fetch the full product collection.
    ///
    /// On success the persisted cache is overwritten wholesale. On failure
    /// the most recent cache is returned, or an empty list if none exists.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Vec<Product> {
        match self.try_fetch_all().await {
            Ok(products) => products,
            Err(err) => {
                tracing::warn!(error = %err, "Catalog fetch failed, falling back to cache");
                self.cached()
            }
        }
    }

    async fn try_fetch_all(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .inner
            .http
            .get(self.inner.endpoint.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let products: Vec<Product> = response.json().await?;
        storage::write_json(self.inner.store.as_ref(), keys::PRODUCTS, &products);
        debug!(count = products.len(), "Catalog cache refreshed");
        Ok(products)
    }

    /// The persisted catalog cache, or empty if absent/corrupt.
    #[must_use]
    pub fn cached(&self) -> Vec<Product> {
        storage::read_json(self.inner.store.as_ref(), keys::PRODUCTS).unwrap_or_default()
    }

    /// Look up a single product by slug.
    ///
    /// Checks the in-memory cache, then the persisted catalog, then falls
    /// back to a remote slug query. `None` means not found anywhere.
    #[instrument(skip(self))]
    pub async fn product_by_slug(&self, slug: &str) -> Option<Product> {
        if let Some(product) = self.inner.by_slug.get(slug).await {
            debug!(slug, "Product served from lookup cache");
            return Some(product);
        }

        let product = match self.cached().into_iter().find(|p| p.slug == slug) {
            Some(product) => product,
            None => self.fetch_by_slug(slug).await?,
        };

        self.inner
            .by_slug
            .insert(slug.to_string(), product.clone())
            .await;
        Some(product)
    }

    /// Look up a single product by ID, falling back to a remote fetch.
    #[instrument(skip(self))]
    pub async fn product_by_id(&self, id: ProductId) -> Option<Product> {
        if let Some(product) = self.cached().into_iter().find(|p| p.id == id) {
            return Some(product);
        }
        self.fetch_by_id(id).await
    }

    /// Products with an active discount, with the same cache fallback as
    /// [`fetch_all`](Self::fetch_all).
    pub async fn discounted(&self) -> Vec<Product> {
        self.fetch_all()
            .await
            .into_iter()
            .filter(|p| p.discount_percent().is_some())
            .collect()
    }

    /// Remote slug query: `GET {endpoint}?slug={slug}`, first match wins.
    async fn fetch_by_slug(&self, slug: &str) -> Option<Product> {
        let mut url = self.inner.endpoint.clone();
        url.query_pairs_mut().append_pair("slug", slug);
        match self.fetch_products(url).await {
            Ok(products) => products.into_iter().next(),
            Err(err) => {
                tracing::warn!(slug, error = %err, "Remote product lookup failed");
                None
            }
        }
    }

    /// Remote ID lookup: `GET {endpoint}/{id}`.
    async fn fetch_by_id(&self, id: ProductId) -> Option<Product> {
        let raw = format!("{}/{id}", self.inner.endpoint);
        let Ok(url) = Url::parse(&raw) else {
            return None;
        };
        let response = match self.inner.http.get(url).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                debug!(%id, status = %response.status(), "Remote product lookup missed");
                return None;
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "Remote product lookup failed");
                return None;
            }
        };
        response.json().await.ok()
    }

    async fn fetch_products(&self, url: Url) -> Result<Vec<Product>, CatalogError> {
        let response = self.inner.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, write_json};
    use fasco_core::ProductId;
    use rust_decimal::Decimal;

    fn unreachable_endpoint() -> Url {
        // Nothing listens on the discard port; requests fail immediately.
        Url::parse("http://127.0.0.1:9/products").unwrap()
    }

    fn sample(id: i64, slug: &str) -> Product {
        Product {
            id: ProductId::new(id),
            slug: slug.to_string(),
            title: format!("Product {id}"),
            brand: "Acme".to_string(),
            price: Decimal::from(20),
            discounted_price: None,
            colors: Vec::new(),
            color_names: Vec::new(),
            sizes: Vec::new(),
            images: Vec::new(),
            image_url: None,
            tags: Vec::new(),
            collection: None,
            category: None,
            status: None,
            ratings: None,
            created_at: None,
            sales_count: None,
        }
    }

    #[tokio::test]
    async fn test_fetch_all_falls_back_to_cache() {
        let store = MemoryStore::shared();
        let seeded = vec![sample(1, "shirt"), sample(2, "bag")];
        write_json(store.as_ref(), keys::PRODUCTS, &seeded);

        let client = CatalogClient::new(unreachable_endpoint(), store);
        let products = client.fetch_all().await;
        assert_eq!(products, seeded);
    }

    #[tokio::test]
    async fn test_fetch_all_without_cache_is_empty() {
        let client = CatalogClient::new(unreachable_endpoint(), MemoryStore::shared());
        assert!(client.fetch_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_product_by_slug_uses_persisted_catalog() {
        let store = MemoryStore::shared();
        write_json(store.as_ref(), keys::PRODUCTS, &vec![sample(1, "shirt")]);

        let client = CatalogClient::new(unreachable_endpoint(), store);
        let product = client.product_by_slug("shirt").await.unwrap();
        assert_eq!(product.id, ProductId::new(1));

        // Unknown slugs miss the cache and the (unreachable) endpoint.
        assert!(client.product_by_slug("hat").await.is_none());
    }

    #[tokio::test]
    async fn test_product_by_id_uses_persisted_catalog() {
        let store = MemoryStore::shared();
        write_json(store.as_ref(), keys::PRODUCTS, &vec![sample(7, "shirt")]);

        let client = CatalogClient::new(unreachable_endpoint(), store);
        assert!(client.product_by_id(ProductId::new(7)).await.is_some());
        assert!(client.product_by_id(ProductId::new(8)).await.is_none());
    }

    #[tokio::test]
    async fn test_discounted_filters_active_discounts_only() {
        let store = MemoryStore::shared();
        let mut on_sale = sample(1, "sale");
        on_sale.discounted_price = Some(Decimal::from(10));
        let mut fake_sale = sample(2, "fake");
        fake_sale.discounted_price = Some(Decimal::from(25));
        write_json(
            store.as_ref(),
            keys::PRODUCTS,
            &vec![on_sale, fake_sale, sample(3, "plain")],
        );

        let client = CatalogClient::new(unreachable_endpoint(), store);
        let discounted = client.discounted().await;
        assert_eq!(discounted.len(), 1);
        assert_eq!(discounted[0].slug, "sale");
    }

    #[test]
    fn test_corrupt_cache_reads_as_empty() {
        let store = MemoryStore::shared();
        store.set(keys::PRODUCTS, "{definitely not json");
        let client = CatalogClient::new(unreachable_endpoint(), store);
        assert!(client.cached().is_empty());
    }
}
