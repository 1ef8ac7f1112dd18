//! Checkout summary command.

use fasco_storefront::pages::CheckoutPage;

use super::Context;

/// `fasco checkout`.
pub fn run(ctx: &Context) {
    let page = CheckoutPage::new(ctx.store.clone());
    let view = page.render();

    if view.empty {
        println!("Your cart is empty. Visit the shop to explore amazing products!");
        return;
    }

    for line in &view.lines {
        println!(
            "{:<32}x{}  {}  (color: {}, size: {})",
            line.title,
            line.quantity,
            line.line_total,
            line.color_name.as_deref().unwrap_or("-"),
            line.size.as_deref().unwrap_or("-"),
        );
    }
    println!("Subtotal: {}", view.subtotal);
    println!("Shipping: {}", view.shipping);
    println!("Total:    {}", view.total);
}
