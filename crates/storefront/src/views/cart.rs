//! Cart, checkout, and add-to-cart button display data.

use fasco_core::format_usd;
use rust_decimal::Decimal;

use crate::types::{Cart, CartItem, LineKey};

/// Flat shipping fee applied to non-empty checkouts.
fn shipping_fee() -> Decimal {
    Decimal::new(1000, 2) // $10.00
}

/// One line in the cart panel or checkout list.
///
/// Carries the line's identity key so quantity controls can address the
/// right line.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineView {
    pub key: LineKey,
    pub title: String,
    pub color_name: Option<String>,
    pub size: Option<String>,
    pub image: Option<String>,
    /// Unit price, formatted.
    pub unit_price: String,
    pub quantity: u32,
    /// Quantity x unit price, formatted.
    pub line_total: String,
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        Self {
            key: item.key(),
            title: item.title.clone(),
            color_name: item.selected_color_name.clone(),
            size: item.selected_size.clone(),
            image: item.images.first().cloned(),
            unit_price: format_usd(item.price),
            quantity: item.quantity,
            line_total: format_usd(item.line_total()),
        }
    }
}

/// The slide-out cart panel.
#[derive(Debug, Clone, PartialEq)]
pub struct CartPanelView {
    pub lines: Vec<CartLineView>,
    /// Subtotal caption (e.g., "Subtotal : $49.98").
    pub subtotal: String,
    /// Total units, shown on the cart badge.
    pub item_count: u32,
}

impl From<&Cart> for CartPanelView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.items().iter().map(CartLineView::from).collect(),
            subtotal: format!("Subtotal : {}", format_usd(cart.total())),
            item_count: cart.item_count(),
        }
    }
}

/// The checkout summary page.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutView {
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
    /// True when the cart is empty; render the empty-cart notice instead of
    /// the summary.
    pub empty: bool,
}

impl From<&Cart> for CheckoutView {
    fn from(cart: &Cart) -> Self {
        if cart.is_empty() {
            return Self {
                lines: Vec::new(),
                subtotal: format_usd(Decimal::ZERO),
                shipping: format_usd(Decimal::ZERO),
                total: format_usd(Decimal::ZERO),
                empty: true,
            };
        }

        let subtotal = cart.total();
        let shipping = shipping_fee();
        Self {
            lines: cart.items().iter().map(CartLineView::from).collect(),
            subtotal: format_usd(subtotal),
            shipping: format_usd(shipping),
            total: format_usd(subtotal + shipping),
            empty: false,
        }
    }
}

/// Add-to-cart button state for one (product, color, size) selection.
///
/// Recompute whenever that selection's presence in the cart changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddToCartButton {
    /// Selection not in the cart; button is enabled.
    Available,
    /// Selection already in the cart; button is disabled.
    InCart,
}

impl AddToCartButton {
    /// Derive the state for a selection from current cart contents.
    #[must_use]
    pub fn for_selection(cart: &Cart, key: &LineKey) -> Self {
        if cart.contains(key) {
            Self::InCart
        } else {
            Self::Available
        }
    }

    /// Button caption.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "Add to cart",
            Self::InCart => "in cart",
        }
    }

    /// Whether the button is disabled.
    #[must_use]
    pub const fn disabled(self) -> bool {
        matches!(self, Self::InCart)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Product;
    use fasco_core::ProductId;

    fn cart_with(quantity: u32, price: i64) -> Cart {
        let product = Product {
            id: ProductId::new(1),
            slug: "jacket".to_string(),
            title: "Jacket".to_string(),
            brand: "Acme".to_string(),
            price: Decimal::from(price),
            discounted_price: None,
            colors: vec!["red".to_string()],
            color_names: vec!["Red".to_string()],
            sizes: vec!["M".to_string()],
            images: vec!["jacket.jpg".to_string()],
            image_url: None,
            tags: Vec::new(),
            collection: None,
            category: None,
            status: None,
            ratings: None,
            created_at: None,
            sales_count: None,
        };
        let mut cart = Cart::default();
        cart.add(
            &product,
            Some("red".to_string()),
            Some("Red".to_string()),
            Some("M".to_string()),
            quantity,
        );
        cart
    }

    #[test]
    fn test_cart_panel_view() {
        let view = CartPanelView::from(&cart_with(2, 25));
        assert_eq!(view.item_count, 2);
        assert_eq!(view.subtotal, "Subtotal : $50.00");
        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].unit_price, "$25.00");
        assert_eq!(view.lines[0].line_total, "$50.00");
        assert_eq!(view.lines[0].image.as_deref(), Some("jacket.jpg"));
    }

    #[test]
    fn test_checkout_totals_include_flat_shipping() {
        let view = CheckoutView::from(&cart_with(2, 25));
        assert!(!view.empty);
        assert_eq!(view.subtotal, "$50.00");
        assert_eq!(view.shipping, "$10.00");
        assert_eq!(view.total, "$60.00");
    }

    #[test]
    fn test_empty_checkout_has_no_shipping() {
        let view = CheckoutView::from(&Cart::default());
        assert!(view.empty);
        assert!(view.lines.is_empty());
        assert_eq!(view.total, "$0.00");
    }

    #[test]
    fn test_button_state_tracks_cart_membership() {
        let cart = cart_with(1, 25);
        let in_cart = LineKey::new(
            ProductId::new(1),
            Some("red".to_string()),
            Some("M".to_string()),
        );
        let other_size = LineKey::new(
            ProductId::new(1),
            Some("red".to_string()),
            Some("L".to_string()),
        );

        let button = AddToCartButton::for_selection(&cart, &in_cart);
        assert_eq!(button, AddToCartButton::InCart);
        assert_eq!(button.label(), "in cart");
        assert!(button.disabled());

        let button = AddToCartButton::for_selection(&cart, &other_size);
        assert_eq!(button, AddToCartButton::Available);
        assert!(!button.disabled());
    }
}
