//! The single-product detail page.
//!
//! Resolved by the `product` query parameter (a slug, with a numeric-ID
//! fallback). A failed lookup yields no page at all; the caller redirects
//! to the listing instead of showing a broken detail view.

use fasco_core::ProductId;

use crate::cart::CartStore;
use crate::catalog::CatalogClient;
use crate::ratings::{RatingRecord, RatingStore};
use crate::storage::SharedStore;
use crate::types::{LineKey, Product};
use crate::views::{AddToCartButton, PriceView, RatingView};

/// Image gallery display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    pub main: Option<String>,
    pub thumbnails: Vec<String>,
}

/// One selectable option (color or size) with its active flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub active: bool,
}

/// Rendered detail page state.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub title: String,
    pub brand: String,
    pub price: PriceView,
    pub gallery: GalleryView,
    pub colors: Vec<OptionView>,
    pub sizes: Vec<OptionView>,
    /// Caption under the swatches (e.g., "Color: Red").
    pub color_label: Option<String>,
    /// Caption under the size row (e.g., "Size: M").
    pub size_label: Option<String>,
    pub quantity: u32,
    pub button: AddToCartButton,
    pub rating: RatingView,
}

/// Controller for the detail page.
pub struct DetailPage {
    product: Product,
    selected_color: Option<(String, String)>,
    selected_size: Option<String>,
    quantity: u32,
    cart: CartStore,
    ratings: RatingStore,
}

impl DetailPage {
    /// Resolve `product_ref` (slug, or numeric ID as fallback) and assemble
    /// the page. `None` means not found anywhere; redirect to the listing.
    pub async fn load(
        client: &CatalogClient,
        store: SharedStore,
        product_ref: &str,
    ) -> Option<Self> {
        let product = match client.product_by_slug(product_ref).await {
            Some(product) => Some(product),
            None => match product_ref.parse::<ProductId>() {
                Ok(id) => client.product_by_id(id).await,
                Err(_) => None,
            },
        }?;

        let selected_color = product.colors.first().map(|value| {
            let name = product.color_name(0).unwrap_or(value).to_string();
            (value.clone(), name)
        });
        let selected_size = product.sizes.first().cloned();

        Some(Self {
            product,
            selected_color,
            selected_size,
            quantity: 1,
            cart: CartStore::new(store.clone()),
            ratings: RatingStore::new(store),
        })
    }

    /// The product under view.
    #[must_use]
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// The cart store owned by this page.
    #[must_use]
    pub fn cart(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Identity key of the current selection.
    #[must_use]
    pub fn selection_key(&self) -> LineKey {
        LineKey::new(
            self.product.id,
            self.selected_color.as_ref().map(|(value, _)| value.clone()),
            self.selected_size.clone(),
        )
    }

    /// Select a color swatch. Ignores values the product does not offer.
    pub fn select_color(&mut self, value: &str) -> bool {
        let Some(index) = self.product.colors.iter().position(|c| c == value) else {
            return false;
        };
        let name = self
            .product
            .color_name(index)
            .unwrap_or(value)
            .to_string();
        self.selected_color = Some((value.to_string(), name));
        true
    }

    /// Select a size. Ignores labels the product does not offer.
    pub fn select_size(&mut self, label: &str) -> bool {
        if !self.product.sizes.iter().any(|s| s == label) {
            return false;
        }
        self.selected_size = Some(label.to_string());
        true
    }

    /// Current quantity-picker value.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Bump the quantity picker.
    pub fn increment_quantity(&mut self) {
        self.quantity += 1;
    }

    /// Lower the quantity picker; never below 1.
    pub fn decrement_quantity(&mut self) {
        if self.quantity > 1 {
            self.quantity -= 1;
        }
    }

    /// Add the current selection at the picked quantity.
    pub fn add_to_cart(&mut self) {
        let (color, color_name) = match &self.selected_color {
            Some((value, name)) => (Some(value.clone()), Some(name.clone())),
            None => (None, None),
        };
        let size = self.selected_size.clone();
        self.cart
            .add_item_with_quantity(&self.product, color, color_name, size, self.quantity);
    }

    /// Submit a star rating for this product.
    pub fn rate(&mut self, stars: u8) -> RatingRecord {
        self.ratings.add_vote(self.product.id, stars)
    }

    /// Derive the full page view from current state.
    #[must_use]
    pub fn render(&self) -> DetailView {
        let images = self.product.all_images();
        let gallery = GalleryView {
            main: images.first().cloned(),
            thumbnails: images,
        };

        let colors = self
            .product
            .colors
            .iter()
            .enumerate()
            .map(|(index, value)| OptionView {
                value: value.clone(),
                label: self
                    .product
                    .color_name(index)
                    .unwrap_or(value)
                    .to_string(),
                active: self
                    .selected_color
                    .as_ref()
                    .is_some_and(|(selected, _)| selected == value),
            })
            .collect();

        let sizes = self
            .product
            .sizes
            .iter()
            .map(|label| OptionView {
                value: label.clone(),
                label: label.clone(),
                active: self.selected_size.as_deref() == Some(label.as_str()),
            })
            .collect();

        DetailView {
            title: self.product.title.clone(),
            brand: self.product.brand.clone(),
            price: PriceView::from(&self.product),
            gallery,
            colors,
            sizes,
            color_label: self
                .selected_color
                .as_ref()
                .map(|(_, name)| format!("Color: {name}")),
            size_label: self.selected_size.as_ref().map(|s| format!("Size: {s}")),
            quantity: self.quantity,
            button: AddToCartButton::for_selection(self.cart.cart(), &self.selection_key()),
            rating: RatingView::from_record(&self.ratings.get(self.product.id)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, keys, write_json};
    use rust_decimal::Decimal;
    use url::Url;

    fn product() -> Product {
        Product {
            id: ProductId::new(5),
            slug: "jacket".to_string(),
            title: "Jacket".to_string(),
            brand: "Acme".to_string(),
            price: Decimal::from(40),
            discounted_price: Some(Decimal::from(30)),
            colors: vec!["red".to_string(), "blue".to_string()],
            color_names: vec!["Red".to_string(), "Blue".to_string()],
            sizes: vec!["M".to_string(), "L".to_string()],
            images: vec!["a.jpg".to_string(), "b.jpg".to_string()],
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

    async fn page() -> DetailPage {
        let store = MemoryStore::shared();
        write_json(store.as_ref(), keys::PRODUCTS, &vec![product()]);
        let client = CatalogClient::new(
            Url::parse("http://127.0.0.1:9/products").unwrap(),
            store.clone(),
        );
        DetailPage::load(&client, store, "jacket").await.unwrap()
    }

    #[tokio::test]
    async fn test_unknown_product_redirects() {
        let store = MemoryStore::shared();
        let client = CatalogClient::new(
            Url::parse("http://127.0.0.1:9/products").unwrap(),
            store.clone(),
        );
        assert!(DetailPage::load(&client, store, "missing").await.is_none());
    }

    #[tokio::test]
    async fn test_defaults_to_first_color_and_size() {
        let page = page().await;
        let view = page.render();
        assert_eq!(view.color_label.as_deref(), Some("Color: Red"));
        assert_eq!(view.size_label.as_deref(), Some("Size: M"));
        assert_eq!(view.quantity, 1);
        assert_eq!(view.price.current, "$30.00");
        assert_eq!(view.price.badge.as_deref(), Some("25% OFF"));
        assert!(view.colors[0].active);
        assert!(!view.colors[1].active);
    }

    #[tokio::test]
    async fn test_add_with_picked_quantity_freezes_discounted_price() {
        let mut page = page().await;
        page.select_color("blue");
        page.select_size("L");
        page.increment_quantity();
        page.increment_quantity();
        page.add_to_cart();

        let cart = page.cart().cart();
        assert_eq!(cart.items().len(), 1);
        let item = &cart.items()[0];
        assert_eq!(item.quantity, 3);
        assert_eq!(item.price, Decimal::from(30));
        assert_eq!(item.selected_color.as_deref(), Some("blue"));
        assert_eq!(item.selected_size.as_deref(), Some("L"));
        assert_eq!(page.render().button, AddToCartButton::InCart);
    }

    #[tokio::test]
    async fn test_button_follows_selection_changes() {
        let mut page = page().await;
        page.add_to_cart();
        assert_eq!(page.render().button, AddToCartButton::InCart);

        // A different size is a different line; the button re-enables.
        page.select_size("L");
        assert_eq!(page.render().button, AddToCartButton::Available);
    }

    #[tokio::test]
    async fn test_quantity_floor_is_one() {
        let mut page = page().await;
        page.decrement_quantity();
        assert_eq!(page.quantity(), 1);
    }

    #[tokio::test]
    async fn test_invalid_selection_is_rejected() {
        let mut page = page().await;
        assert!(!page.select_color("chartreuse"));
        assert!(!page.select_size("XXXL"));
        let view = page.render();
        assert_eq!(view.color_label.as_deref(), Some("Color: Red"));
    }

    #[tokio::test]
    async fn test_rating_updates_render() {
        let mut page = page().await;
        page.rate(5);
        page.rate(4);
        let view = page.render();
        assert_eq!(view.rating.reviews, "(2) Customer Reviews");
        assert_eq!(view.rating.filled, 5);
    }

    #[tokio::test]
    async fn test_load_by_numeric_id() {
        let store = MemoryStore::shared();
        write_json(store.as_ref(), keys::PRODUCTS, &vec![product()]);
        let client = CatalogClient::new(
            Url::parse("http://127.0.0.1:9/products").unwrap(),
            store.clone(),
        );
        let page = DetailPage::load(&client, store, "5").await.unwrap();
        assert_eq!(page.product().slug, "jacket");
    }
}
