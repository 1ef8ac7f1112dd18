//! Cart commands.

use fasco_core::ProductId;
use fasco_storefront::cart::{CartEvent, CartStore};
use fasco_storefront::types::{LineKey, Product};
use fasco_storefront::views::CartPanelView;

use super::Context;

/// Quantity adjustment requested from the command line.
#[derive(Debug, Clone, Copy)]
pub enum Adjust {
    Up,
    Down,
    Remove,
}

/// Resolve a product by slug, falling back to a numeric ID.
pub(crate) async fn resolve(ctx: &Context, slug: &str) -> Option<Product> {
    match ctx.catalog.product_by_slug(slug).await {
        Some(product) => Some(product),
        None => match slug.parse::<ProductId>() {
            Ok(id) => ctx.catalog.product_by_id(id).await,
            Err(_) => None,
        },
    }
}

/// Open the persisted cart with a subscription that narrates every event,
/// standing in for the badge/panel refreshes on the shop pages.
fn open_cart(ctx: &Context) -> CartStore {
    let mut store = CartStore::new(ctx.store.clone());
    store.subscribe(|event| match event {
        CartEvent::Updated => println!("(cart updated)"),
        CartEvent::ItemRemoved(key) => println!(
            "(removed {} / {} / {})",
            key.id,
            key.color.as_deref().unwrap_or("-"),
            key.size.as_deref().unwrap_or("-"),
        ),
        CartEvent::Cleared => println!("(cart cleared)"),
    });
    store
}

fn line_key(product: &Product, color: Option<String>, size: Option<String>) -> LineKey {
    LineKey::new(
        product.id,
        color.or_else(|| product.colors.first().cloned()),
        size.or_else(|| product.sizes.first().cloned()),
    )
}

fn print_panel(view: &CartPanelView) {
    if view.lines.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for line in &view.lines {
        println!(
            "{:<32}{} x{}  {}  (color: {}, size: {})",
            line.title,
            line.unit_price,
            line.quantity,
            line.line_total,
            line.color_name.as_deref().unwrap_or("-"),
            line.size.as_deref().unwrap_or("-"),
        );
    }
    println!("{}  ({} items)", view.subtotal, view.item_count);
}

/// `fasco cart add`.
pub async fn add(
    ctx: &Context,
    slug: &str,
    color: Option<String>,
    size: Option<String>,
    quantity: u32,
) {
    let Some(product) = resolve(ctx, slug).await else {
        println!("Product not found: {slug}");
        return;
    };

    // Default to the product's first color and size, like the shop cards.
    let key = line_key(&product, color, size);
    let color_name = key.color.as_ref().and_then(|value| {
        product
            .colors
            .iter()
            .position(|c| c == value)
            .and_then(|index| product.color_name(index))
            .map(str::to_string)
    });

    let mut cart = open_cart(ctx);
    cart.add_item_with_quantity(
        &product,
        key.color.clone(),
        color_name,
        key.size.clone(),
        quantity.max(1),
    );
    print_panel(&CartPanelView::from(cart.cart()));
}

/// `fasco cart show`.
pub fn show(ctx: &Context) {
    let cart = CartStore::new(ctx.store.clone());
    print_panel(&CartPanelView::from(cart.cart()));
}

/// `fasco cart increment|decrement|remove`.
pub async fn adjust(
    ctx: &Context,
    slug: &str,
    color: Option<String>,
    size: Option<String>,
    adjust: Adjust,
) {
    let Some(product) = resolve(ctx, slug).await else {
        println!("Product not found: {slug}");
        return;
    };

    let key = line_key(&product, color, size);
    let mut cart = open_cart(ctx);
    match adjust {
        Adjust::Up => cart.increment(&key),
        Adjust::Down => cart.decrement(&key),
        Adjust::Remove => cart.remove(&key),
    }
    print_panel(&CartPanelView::from(cart.cart()));
}

/// `fasco cart clear`.
pub fn clear(ctx: &Context) {
    let mut cart = open_cart(ctx);
    cart.clear();
    print_panel(&CartPanelView::from(cart.cart()));
}
