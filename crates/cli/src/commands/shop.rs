//! Listing and product-detail commands.

use fasco_storefront::filter::{ColorChoice, PriceRange, SortKey};
use fasco_storefront::pages::{DetailPage, ListingPage};
use fasco_storefront::views::PageControl;

use super::Context;

/// Flags accepted by `fasco shop`.
pub struct ShopOptions {
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub prices: Vec<String>,
    pub brands: Vec<String>,
    pub tags: Vec<String>,
    pub collection: Option<String>,
    pub sort: Option<String>,
    pub page: usize,
    pub search: Option<String>,
}

/// Render the listing page with the requested filters.
pub async fn run(ctx: &Context, options: ShopOptions) -> Result<(), String> {
    let sort = options
        .sort
        .as_deref()
        .map(str::parse::<SortKey>)
        .transpose()?;
    let prices = options
        .prices
        .iter()
        .map(|raw| parse_price_range(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let mut page =
        ListingPage::load(&ctx.catalog, ctx.store.clone(), ctx.config.page_size).await;

    if let Some(query) = &options.search {
        for product in page.search(query) {
            println!("{}  {} ({})", product.slug, product.title, product.brand);
        }
        return Ok(());
    }

    page.with_filters(|engine| {
        for size in &options.sizes {
            engine.toggle_size(size.clone());
        }
        for color in &options.colors {
            engine.toggle_color(ColorChoice::new(color.clone(), None));
        }
        for range in prices {
            engine.toggle_price_range(range);
        }
        for brand in &options.brands {
            engine.toggle_brand(brand.clone());
        }
        for tag in &options.tags {
            engine.toggle_tag(tag.clone());
        }
        if let Some(collection) = &options.collection {
            engine.select_collection(collection.clone());
        }
        engine.set_sort(sort);
    });
    page.select_page(options.page);

    let view = page.render();

    if !view.chips.is_empty() {
        let labels: Vec<&str> = view.chips.iter().map(|c| c.label.as_str()).collect();
        println!("Filters: {}", labels.join(" | "));
    }

    if let Some(notice) = &view.notice {
        println!("{notice}");
        return Ok(());
    }

    for card in &view.cards {
        let price = match &card.price.original {
            Some(original) => format!(
                "{} (was {}, {})",
                card.price.current,
                original,
                card.price.badge.as_deref().unwrap_or_default()
            ),
            None => card.price.current.clone(),
        };
        println!("{:<24}{:<32}{price}", card.slug, card.title);
    }

    for control in &view.pagination {
        if let PageControl::Page { number, active } = control {
            let marker = if *active { "*" } else { " " };
            print!("[{marker}{number}]");
        }
    }
    if !view.pagination.is_empty() {
        println!();
    }
    Ok(())
}

/// Render the product detail page; unknown products fall back to the
/// listing, exactly like the browser redirect.
pub async fn product(ctx: &Context, slug: &str) {
    let Some(page) = DetailPage::load(&ctx.catalog, ctx.store.clone(), slug).await else {
        println!("Product not found, returning to the shop listing.");
        return;
    };

    let view = page.render();
    println!("{} - {}", view.brand, view.title);
    match &view.price.original {
        Some(original) => println!(
            "{} (was {original}, {})",
            view.price.current,
            view.price.badge.as_deref().unwrap_or_default()
        ),
        None => println!("{}", view.price.current),
    }
    if let Some(label) = &view.color_label {
        println!("{label}");
    }
    if let Some(label) = &view.size_label {
        println!("{label}");
    }
    println!(
        "{} {}",
        "\u{2605}".repeat(usize::from(view.rating.filled)),
        view.rating.reviews
    );
    println!("[{}]", view.button.label());
}

/// List products with an active discount (the home-page deals rail).
pub async fn deals(ctx: &Context) {
    let discounted = ctx.catalog.discounted().await;
    if discounted.is_empty() {
        println!("No discounted products available");
        return;
    }
    for product in &discounted {
        let percent = product.discount_percent().unwrap_or_default();
        println!("{:<24}{:<32}{}% OFF", product.slug, product.title, percent);
    }
}

fn parse_price_range(raw: &str) -> Result<PriceRange, String> {
    let (min, max) = raw
        .split_once('-')
        .ok_or_else(|| format!("invalid price range: {raw} (expected min-max)"))?;
    let min = min
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid price range {raw}: {e}"))?;
    let max = max
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid price range {raw}: {e}"))?;
    Ok(PriceRange::from_dollars(min, max))
}
