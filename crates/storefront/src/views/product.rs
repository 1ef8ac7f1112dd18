//! Product display data.

use fasco_core::format_usd;

use crate::filter::ColorChoice;
use crate::ratings::RatingRecord;
use crate::types::{Product, RatingSummary};

use super::cart::AddToCartButton;

/// Price display: current price, struck-through original when discounted,
/// and the discount badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceView {
    /// The price the buyer pays (effective price, formatted).
    pub current: String,
    /// Original list price, present only when a discount is active.
    pub original: Option<String>,
    /// Discount badge text (e.g., "20% OFF"), present only when active.
    pub badge: Option<String>,
}

impl From<&Product> for PriceView {
    fn from(product: &Product) -> Self {
        let percent = product.discount_percent();
        Self {
            current: format_usd(product.effective_price()),
            original: percent.map(|_| format_usd(product.price)),
            badge: percent.map(|p| format!("{p}% OFF")),
        }
    }
}

/// Star-row display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingView {
    /// Number of filled stars out of 5.
    pub filled: u8,
    /// Review-count caption (e.g., "(12) Customer Reviews").
    pub reviews: String,
}

impl RatingView {
    /// View for a product card, from the catalog's aggregate summary.
    /// Records without a summary render the stock four-star row.
    #[must_use]
    pub fn from_summary(summary: Option<&RatingSummary>) -> Self {
        let average = summary.map_or(4.0, |s| s.average);
        let count = summary.map_or(0, |s| s.count);
        Self {
            filled: clamp_stars(average),
            reviews: format!("({count}) Customer Reviews"),
        }
    }

    /// View for the detail page, from the locally persisted record.
    #[must_use]
    pub fn from_record(record: &RatingRecord) -> Self {
        Self {
            filled: record.rounded_average(),
            reviews: format!("({}) Customer Reviews", record.count),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_stars(average: f64) -> u8 {
    let rounded = average.round();
    if rounded <= 0.0 {
        0
    } else if rounded >= 5.0 {
        5
    } else {
        // In 0..=5 after the clamps above
        rounded as u8
    }
}

/// One card in the listing grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCardView {
    pub slug: String,
    pub title: String,
    pub brand: String,
    pub image: Option<String>,
    pub price: PriceView,
    /// Color swatches shown on the card.
    pub colors: Vec<ColorChoice>,
    pub rating: RatingView,
    pub status: Option<String>,
    /// Add-to-cart state for the card's default selection.
    pub button: AddToCartButton,
}

impl ProductCardView {
    /// Build a card; `button` reflects the card's current selection.
    #[must_use]
    pub fn new(product: &Product, button: AddToCartButton) -> Self {
        let colors = product
            .colors
            .iter()
            .enumerate()
            .map(|(index, value)| {
                ColorChoice::new(value.clone(), product.color_name(index).map(str::to_string))
            })
            .collect();
        Self {
            slug: product.slug.clone(),
            title: product.title.clone(),
            brand: product.brand.clone(),
            image: product.first_image().map(str::to_string),
            price: PriceView::from(product),
            colors,
            rating: RatingView::from_summary(product.ratings.as_ref()),
            status: product.status.clone(),
            button,
        }
    }
}
