//! Listing-page filtering, sorting, and pagination against a seeded cache.

#![allow(clippy::unwrap_used)]

use fasco_integration_tests::{offline_client, sample_catalog, seed_catalog, temp_file_store};
use fasco_storefront::filter::{FilterEngine, PriceRange, SortKey};
use fasco_storefront::pages::ListingPage;

async fn loaded_page() -> (tempfile::TempDir, ListingPage) {
    let (dir, store) = temp_file_store();
    seed_catalog(&store, &sample_catalog());
    let client = offline_client(store.clone());
    let page = ListingPage::load(&client, store, 9).await;
    (dir, page)
}

#[tokio::test]
async fn newest_sort_paginates_nine_then_three() {
    let (_dir, mut page) = loaded_page().await;
    page.with_filters(|engine| engine.set_sort(Some(SortKey::Newest)));

    let view = page.render();
    assert_eq!(view.cards.len(), 9);
    // Most recently created first: item-12 downwards.
    assert_eq!(view.cards[0].slug, "item-12");
    assert_eq!(view.cards[8].slug, "item-4");

    page.select_page(2);
    let view = page.render();
    assert_eq!(view.cards.len(), 3);
    assert_eq!(view.cards[0].slug, "item-3");
    assert_eq!(view.cards[2].slug, "item-1");
}

#[tokio::test]
async fn filters_are_conjunctive_across_categories() {
    let (_dir, mut page) = loaded_page().await;

    // Brand Zeta alone: the six even items.
    page.with_filters(|engine| engine.toggle_brand("Zeta"));
    assert_eq!(page.render().cards.len(), 6);

    // Adding size S keeps only even multiples of three: 6 and 12.
    page.with_filters(|engine| engine.toggle_size("S"));
    let view = page.render();
    let slugs: Vec<&str> = view.cards.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(slugs, vec!["item-6", "item-12"]);
}

#[tokio::test]
async fn price_filter_uses_effective_price() {
    let (_dir, mut page) = loaded_page().await;

    // item-5 lists at 50 but is discounted to 25; items 1-2 list at 10/20.
    page.with_filters(|engine| engine.toggle_price_range(PriceRange::from_dollars(0, 30)));
    let view = page.render();
    let slugs: Vec<&str> = view.cards.iter().map(|c| c.slug.as_str()).collect();
    assert_eq!(slugs, vec!["item-1", "item-2", "item-3", "item-5"]);
}

#[tokio::test]
async fn price_ascending_sort_orders_by_effective_price() {
    let (_dir, mut page) = loaded_page().await;
    page.with_filters(|engine| {
        engine.toggle_price_range(PriceRange::from_dollars(0, 40));
        engine.set_sort(Some(SortKey::PriceAscending));
    });

    let view = page.render();
    let slugs: Vec<&str> = view.cards.iter().map(|c| c.slug.as_str()).collect();
    // Effective prices: item-1=10, item-2=20, item-5=25, item-3=30, item-4=40.
    assert_eq!(
        slugs,
        vec!["item-1", "item-2", "item-5", "item-3", "item-4"]
    );
}

#[tokio::test]
async fn collection_filter_and_chips() {
    let (_dir, mut page) = loaded_page().await;
    page.with_filters(|engine| engine.select_collection("Summer"));

    let view = page.render();
    assert_eq!(view.cards.len(), 4);
    let labels: Vec<&str> = view.chips.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Collection: Summer", "Clear All"]);
}

#[tokio::test]
async fn clearing_filters_restores_full_catalog() {
    let (_dir, mut page) = loaded_page().await;
    page.with_filters(|engine| {
        engine.toggle_brand("Zeta");
        engine.toggle_size("S");
    });
    assert_eq!(page.render().cards.len(), 2);

    page.with_filters(FilterEngine::clear_all);
    let view = page.render();
    assert_eq!(view.cards.len(), 9);
    assert!(view.chips.is_empty());
}

#[tokio::test]
async fn best_selling_sort_descends_by_sales() {
    let (_dir, mut page) = loaded_page().await;
    page.with_filters(|engine| engine.set_sort(Some(SortKey::BestSelling)));

    let view = page.render();
    assert_eq!(view.cards[0].slug, "item-12");
    assert_eq!(view.cards[1].slug, "item-11");
}

#[tokio::test]
async fn search_matches_titles_case_insensitively() {
    let (_dir, page) = loaded_page().await;
    let hits = page.search("product 1");
    // "Product 1", "Product 10", "Product 11", "Product 12".
    assert_eq!(hits.len(), 4);
    assert!(page.search("   ").is_empty());
}
