//! Domain types for the FASCO catalog and cart.
//!
//! These mirror the JSON the catalog endpoint serves and the persisted
//! cart format, with defined defaulting rules for the optional fields.

use fasco_core::ProductId;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// Product Types
// =============================================================================

/// Aggregate rating shipped with a product record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct RatingSummary {
    /// Total number of votes.
    #[serde(default)]
    pub count: u32,
    /// Average rating value (e.g., 4.5).
    #[serde(default)]
    pub average: f64,
}

/// A product in the catalog.
///
/// Sourced externally and read-only from this crate's perspective. Optional
/// fields default to "absent": no colors means an empty set, no discounted
/// price means not discounted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// URL slug.
    #[serde(default)]
    pub slug: String,
    /// Product title.
    #[serde(default)]
    pub title: String,
    /// Brand name.
    #[serde(default)]
    pub brand: String,
    /// List price.
    pub price: Decimal,
    /// Discounted price; only active when strictly below the list price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<Decimal>,
    /// Available color values (CSS color strings).
    #[serde(default)]
    pub colors: Vec<String>,
    /// Display names parallel to `colors`; missing entries fall back to the
    /// color value.
    #[serde(default)]
    pub color_names: Vec<String>,
    /// Available size labels.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Legacy single-image field used by older catalog records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Product tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Collection name; the catalog feed uses a plural key for this single
    /// value.
    #[serde(default, rename = "collections", skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    /// Home-page category bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Availability label (e.g., "Almost Sold Out").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Aggregate rating, when the record carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings: Option<RatingSummary>,
    /// Creation timestamp; drives the "newest" sort.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Units sold; drives the "best-selling" sort.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_count: Option<u64>,
}

impl Product {
    /// The price a buyer pays right now: the discounted price when present
    /// and strictly below the list price, else the list price.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        match self.discounted_price {
            Some(discounted) if discounted < self.price => discounted,
            _ => self.price,
        }
    }

    /// Whole-percent discount when the discount is active.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let discounted = self.discounted_price.filter(|d| *d < self.price)?;
        if self.price.is_zero() {
            return None;
        }
        let percent = (self.price - discounted) * Decimal::from(100) / self.price;
        percent
            .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
    }

    /// Display name for the color at `index`, falling back to the color
    /// value itself.
    #[must_use]
    pub fn color_name(&self, index: usize) -> Option<&str> {
        let value = self.colors.get(index)?;
        Some(self.color_names.get(index).unwrap_or(value).as_str())
    }

    /// First image, preferring the `images` list over the legacy field.
    #[must_use]
    pub fn first_image(&self) -> Option<&str> {
        self.images
            .first()
            .or(self.image_url.as_ref())
            .map(String::as_str)
    }

    /// All image URLs, including the legacy single-image field when the
    /// list is empty.
    #[must_use]
    pub fn all_images(&self) -> Vec<String> {
        if self.images.is_empty() {
            self.image_url.iter().cloned().collect()
        } else {
            self.images.clone()
        }
    }

    /// Cart identity key for this product with the default selection
    /// (first color, first size).
    #[must_use]
    pub fn default_line_key(&self) -> LineKey {
        LineKey {
            id: self.id,
            color: self.colors.first().cloned(),
            size: self.sizes.first().cloned(),
        }
    }
}

// =============================================================================
// Cart Types
// =============================================================================

/// Identity key for a cart line.
///
/// Distinct color/size combinations of the same product are distinct lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    /// Product ID.
    pub id: ProductId,
    /// Selected color value.
    pub color: Option<String>,
    /// Selected size label.
    pub size: Option<String>,
}

impl LineKey {
    /// Create a key from owned parts.
    #[must_use]
    pub const fn new(id: ProductId, color: Option<String>, size: Option<String>) -> Self {
        Self { id, color, size }
    }
}

/// A line item in the cart.
///
/// The unit price is frozen at add time; later catalog price changes do not
/// reprice existing lines. Persisted field names match the storage format
/// (`selectedColor`, `selectedSize`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product ID.
    pub id: ProductId,
    /// Product title at add time.
    #[serde(default)]
    pub title: String,
    /// Unit price frozen at add time (the product's effective price).
    pub price: Decimal,
    /// Image URLs carried over from the product.
    #[serde(default)]
    pub images: Vec<String>,
    /// Selected color value.
    #[serde(default)]
    pub selected_color: Option<String>,
    /// Selected color display name.
    #[serde(default)]
    pub selected_color_name: Option<String>,
    /// Selected size label.
    #[serde(default)]
    pub selected_size: Option<String>,
    /// Quantity. Mutations never leave this at 0; a missing or non-numeric
    /// persisted value loads as 0 and contributes nothing to totals.
    #[serde(default, deserialize_with = "lenient_quantity")]
    pub quantity: u32,
}

impl CartItem {
    /// Identity key of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            id: self.id,
            color: self.selected_color.clone(),
            size: self.selected_size.clone(),
        }
    }

    /// Whether this line matches the given identity key.
    #[must_use]
    pub fn matches(&self, key: &LineKey) -> bool {
        self.id == key.id && self.selected_color == key.color && self.selected_size == key.size
    }

    /// Line total: quantity x unit price.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.price
    }
}

/// Accept numbers, numeric strings, or garbage for the persisted quantity
/// field; anything unusable loads as 0 instead of failing the whole cart.
fn lenient_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let quantity = match &value {
        serde_json::Value::Number(n) => {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let from_float = n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64);
            n.as_u64().or(from_float)
        }
        serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(quantity
        .and_then(|q| u32::try_from(q).ok())
        .unwrap_or_default())
}

/// The shopping cart: an ordered collection of lines, unique by identity
/// key, insertion order preserved for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a line with this identity key exists.
    #[must_use]
    pub fn contains(&self, key: &LineKey) -> bool {
        self.items.iter().any(|item| item.matches(key))
    }

    /// The line with this identity key, if any.
    #[must_use]
    pub fn get(&self, key: &LineKey) -> Option<&CartItem> {
        self.items.iter().find(|item| item.matches(key))
    }

    /// Sum of quantity x unit price over all lines. Exact; rounding happens
    /// only at display time.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Add `quantity` units of a product selection.
    ///
    /// An existing line with the same identity key has its quantity
    /// incremented; otherwise a new line is appended with the product's
    /// current effective price as its frozen unit price.
    pub fn add(
        &mut self,
        product: &Product,
        color: Option<String>,
        color_name: Option<String>,
        size: Option<String>,
        quantity: u32,
    ) {
        if quantity == 0 {
            return;
        }
        let key = LineKey::new(product.id, color.clone(), size.clone());
        if let Some(item) = self.items.iter_mut().find(|item| item.matches(&key)) {
            item.quantity += quantity;
            return;
        }
        self.items.push(CartItem {
            id: product.id,
            title: product.title.clone(),
            price: product.effective_price(),
            images: product.all_images(),
            selected_color: color,
            selected_color_name: color_name,
            selected_size: size,
            quantity,
        });
    }

    /// Increase a line's quantity by 1. No-op when the key is absent.
    ///
    /// Returns whether a line changed.
    pub fn increment(&mut self, key: &LineKey) -> bool {
        match self.items.iter_mut().find(|item| item.matches(key)) {
            Some(item) => {
                item.quantity += 1;
                true
            }
            None => false,
        }
    }

    /// Decrease a line's quantity by 1, removing the line at quantity 1.
    /// No-op when the key is absent.
    pub fn decrement(&mut self, key: &LineKey) -> Decremented {
        let Some(index) = self.items.iter().position(|item| item.matches(key)) else {
            return Decremented::Missing;
        };
        // Quantity 0 only occurs for malformed persisted lines; treat those
        // like quantity 1 and drop the line.
        if self.items.get(index).is_some_and(|item| item.quantity > 1) {
            if let Some(item) = self.items.get_mut(index) {
                item.quantity -= 1;
            }
            Decremented::Updated
        } else {
            self.items.remove(index);
            Decremented::Removed
        }
    }

    /// Remove a line regardless of quantity. Returns whether it existed.
    pub fn remove(&mut self, key: &LineKey) -> bool {
        let before = self.items.len();
        self.items.retain(|item| !item.matches(key));
        self.items.len() != before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Outcome of [`Cart::decrement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decremented {
    /// Quantity decreased and the line remains.
    Updated,
    /// Quantity hit zero and the line was removed.
    Removed,
    /// No line matched the key.
    Missing,
}
