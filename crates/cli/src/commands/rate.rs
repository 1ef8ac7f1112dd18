//! Product rating command.

use fasco_storefront::ratings::RatingStore;

use super::Context;
use super::cart::resolve;

/// `fasco rate`.
pub async fn run(ctx: &Context, slug: &str, stars: u8) {
    let Some(product) = resolve(ctx, slug).await else {
        println!("Product not found: {slug}");
        return;
    };

    let ratings = RatingStore::new(ctx.store.clone());
    let record = ratings.add_vote(product.id, stars);
    println!(
        "Thank you for your rating! {} now averages {:.1} over {} votes.",
        product.title, record.average, record.count
    );
}
