//! The shop listing page: filter panel, product grid, cart panel.

use crate::cart::CartStore;
use crate::catalog::CatalogClient;
use crate::filter::{
    self, ColorChoice, FilterEngine, PriceRange, standard_price_ranges,
};
use crate::storage::SharedStore;
use crate::types::Product;
use crate::views::{
    AddToCartButton, CartPanelView, FilterChip, PageControl, ProductCardView, ProductGrid,
    filter_chips,
};

/// Values offered by the filter panel, derived from the loaded catalog.
#[derive(Debug, Clone)]
pub struct Facets {
    pub sizes: Vec<String>,
    pub colors: Vec<ColorChoice>,
    pub price_ranges: Vec<PriceRange>,
    pub brands: Vec<String>,
    pub tags: Vec<String>,
    pub collections: Vec<String>,
}

impl Facets {
    fn from_catalog(catalog: &[Product]) -> Self {
        Self {
            sizes: filter::size_facets(catalog),
            colors: filter::color_facets(catalog),
            price_ranges: standard_price_ranges(),
            brands: filter::brand_facets(catalog),
            tags: filter::tag_facets(catalog),
            collections: filter::collection_facets(catalog),
        }
    }
}

/// Rendered listing page state.
#[derive(Debug, Clone)]
pub struct ListingView {
    pub cards: Vec<ProductCardView>,
    pub pagination: Vec<PageControl>,
    pub chips: Vec<FilterChip>,
    pub cart: CartPanelView,
    /// Placeholder copy when the grid is empty.
    pub notice: Option<String>,
}

/// Controller for the listing page.
pub struct ListingPage {
    catalog: Vec<Product>,
    facets: Facets,
    engine: FilterEngine,
    grid: ProductGrid,
    cart: CartStore,
}

impl ListingPage {
    /// Fetch the catalog (with cache fallback) and assemble the page.
    pub async fn load(client: &CatalogClient, store: SharedStore, page_size: usize) -> Self {
        let catalog = client.fetch_all().await;
        let facets = Facets::from_catalog(&catalog);
        let engine = FilterEngine::new();
        let mut grid = ProductGrid::new(page_size);
        grid.set_products(engine.apply(&catalog));

        Self {
            catalog,
            facets,
            engine,
            grid,
            cart: CartStore::new(store),
        }
    }

    /// Filter panel values for this catalog.
    #[must_use]
    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    /// The loaded catalog (unfiltered).
    #[must_use]
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// The cart store owned by this page.
    #[must_use]
    pub fn cart(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Mutate the filter selection, then re-derive the grid. The grid
    /// resets to page 1 whenever the filtered set is replaced.
    pub fn with_filters(&mut self, mutate: impl FnOnce(&mut FilterEngine)) {
        mutate(&mut self.engine);
        self.grid.set_products(self.engine.apply(&self.catalog));
    }

    /// Jump to a grid page.
    pub fn select_page(&mut self, page: usize) {
        self.grid.goto(page);
    }

    /// Header search over the loaded catalog.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        filter::search_titles(&self.catalog, query)
    }

    /// Quick add from a product card: first color and first size, quantity 1.
    ///
    /// Returns false when the slug is not in the loaded catalog.
    pub fn quick_add(&mut self, slug: &str) -> bool {
        let Some(product) = self.catalog.iter().find(|p| p.slug == slug).cloned() else {
            return false;
        };
        let color = product.colors.first().cloned();
        let color_name = product.color_name(0).map(str::to_string);
        let size = product.sizes.first().cloned();
        self.cart.add_item(&product, color, color_name, size);
        true
    }

    /// Derive the full page view from current state.
    #[must_use]
    pub fn render(&self) -> ListingView {
        let cards: Vec<ProductCardView> = self
            .grid
            .page_items()
            .iter()
            .map(|product| {
                let button =
                    AddToCartButton::for_selection(self.cart.cart(), &product.default_line_key());
                ProductCardView::new(product, button)
            })
            .collect();

        let notice = if !cards.is_empty() {
            None
        } else if self.catalog.is_empty() {
            Some("No products available".to_string())
        } else {
            Some("No products match your filters".to_string())
        };

        ListingView {
            cards,
            pagination: self.grid.pagination(),
            chips: filter_chips(&self.engine),
            cart: CartPanelView::from(self.cart.cart()),
            notice,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, keys, write_json};
    use fasco_core::ProductId;
    use rust_decimal::Decimal;
    use url::Url;

    fn product(id: i64, slug: &str, price: i64, brand: &str) -> Product {
        Product {
            id: ProductId::new(id),
            slug: slug.to_string(),
            title: format!("Product {id}"),
            brand: brand.to_string(),
            price: Decimal::from(price),
            discounted_price: None,
            colors: vec!["red".to_string()],
            color_names: vec!["Red".to_string()],
            sizes: vec!["M".to_string()],
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

    fn seeded_page(products: &[Product]) -> (SharedStore, CatalogClient) {
        let store = MemoryStore::shared();
        write_json(store.as_ref(), keys::PRODUCTS, &products.to_vec());
        let client = CatalogClient::new(
            Url::parse("http://127.0.0.1:9/products").unwrap(),
            store.clone(),
        );
        (store, client)
    }

    #[tokio::test]
    async fn test_load_serves_cached_catalog_when_offline() {
        let catalog = vec![product(1, "a", 10, "Acme"), product(2, "b", 20, "Zeta")];
        let (store, client) = seeded_page(&catalog);

        let page = ListingPage::load(&client, store, 9).await;
        let view = page.render();
        assert_eq!(view.cards.len(), 2);
        assert_eq!(view.notice, None);
        assert_eq!(page.facets().brands, vec!["Acme", "Zeta"]);
    }

    #[tokio::test]
    async fn test_filtering_resets_grid_to_page_one() {
        let catalog: Vec<Product> = (1..=12)
            .map(|i| product(i, &format!("p-{i}"), 10, "Acme"))
            .collect();
        let (store, client) = seeded_page(&catalog);

        let mut page = ListingPage::load(&client, store, 9).await;
        page.select_page(2);
        assert_eq!(page.render().cards.len(), 3);

        page.with_filters(|engine| engine.toggle_brand("Acme"));
        let view = page.render();
        assert_eq!(view.cards.len(), 9);
        assert!(view.chips.iter().any(|c| c.label == "Brand: Acme"));
    }

    #[tokio::test]
    async fn test_quick_add_uses_default_selection() {
        let catalog = vec![product(5, "jacket", 20, "Acme")];
        let (store, client) = seeded_page(&catalog);

        let mut page = ListingPage::load(&client, store, 9).await;
        assert!(page.quick_add("jacket"));
        assert!(!page.quick_add("missing"));

        let view = page.render();
        assert_eq!(view.cart.item_count, 1);
        assert_eq!(view.cart.lines[0].color_name.as_deref(), Some("Red"));
        assert_eq!(view.cart.lines[0].size.as_deref(), Some("M"));
        assert_eq!(view.cards[0].button, AddToCartButton::InCart);
    }

    #[tokio::test]
    async fn test_empty_filter_result_notice() {
        let catalog = vec![product(1, "a", 10, "Acme")];
        let (store, client) = seeded_page(&catalog);

        let mut page = ListingPage::load(&client, store, 9).await;
        page.with_filters(|engine| engine.toggle_brand("Nobody"));
        let view = page.render();
        assert!(view.cards.is_empty());
        assert_eq!(view.notice.as_deref(), Some("No products match your filters"));
    }

    #[tokio::test]
    async fn test_empty_catalog_notice() {
        let store = MemoryStore::shared();
        let client = CatalogClient::new(
            Url::parse("http://127.0.0.1:9/products").unwrap(),
            store.clone(),
        );
        let page = ListingPage::load(&client, store, 9).await;
        assert_eq!(
            page.render().notice.as_deref(),
            Some("No products available")
        );
    }
}
