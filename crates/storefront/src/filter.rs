//! Filter selection and the product filtering pipeline.
//!
//! The selection is held in memory only and resets with the page. Filtering
//! is a pure function of (catalog, selection): within a category any selected
//! value may match (OR), across categories every non-empty category must
//! match (AND), and the sort runs last without mutating the catalog.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::types::Product;

/// Sentinel collection entry meaning "no collection constraint".
pub const ALL_PRODUCTS: &str = "All products";

/// Canonical size ordering for the size facet.
const SIZE_ORDER: [&str; 5] = ["S", "M", "L", "XL", "XXL"];

// =============================================================================
// Selection Types
// =============================================================================

/// A selectable color: CSS value plus display name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ColorChoice {
    /// CSS color value (e.g., "#ff0000" or "red").
    pub value: String,
    /// Human-readable name (e.g., "Red"); falls back to the value.
    pub name: String,
}

impl ColorChoice {
    /// Create a choice, defaulting the display name to the value.
    #[must_use]
    pub fn new(value: impl Into<String>, name: Option<String>) -> Self {
        let value = value.into();
        let name = name.unwrap_or_else(|| value.clone());
        Self { value, name }
    }
}

/// An inclusive price interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    /// Create a range from whole-dollar bounds.
    #[must_use]
    pub fn from_dollars(min: i64, max: i64) -> Self {
        Self {
            min: Decimal::from(min),
            max: Decimal::from(max),
        }
    }

    /// Inclusive membership test.
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && price <= self.max
    }

    /// Display label (e.g., "$50-$100").
    #[must_use]
    pub fn label(&self) -> String {
        format!("${}-${}", self.min, self.max)
    }
}

/// The fixed price brackets offered by the shop filter panel.
#[must_use]
pub fn standard_price_ranges() -> Vec<PriceRange> {
    [(0, 50), (50, 100), (100, 150), (150, 200), (300, 400)]
        .into_iter()
        .map(|(min, max)| PriceRange::from_dollars(min, max))
        .collect()
}

/// Sort order applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Creation timestamp, newest first.
    Newest,
    /// Effective price, cheapest first.
    PriceAscending,
    /// Effective price, priciest first.
    PriceDescending,
    /// Sales count, highest first.
    BestSelling,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "price-low" => Ok(Self::PriceAscending),
            "price-high" => Ok(Self::PriceDescending),
            "best-selling" => Ok(Self::BestSelling),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// The active filter selection.
///
/// Each set holds unique entries; an empty category imposes no constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub sizes: BTreeSet<String>,
    pub colors: BTreeSet<ColorChoice>,
    pub price_ranges: BTreeSet<PriceRange>,
    pub brands: BTreeSet<String>,
    pub tags: BTreeSet<String>,
    /// Single collection constraint; `None` or the sentinel means all.
    pub collection: Option<String>,
    pub sort: Option<SortKey>,
}

impl FilterSelection {
    /// Whether any category constrains the catalog.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.sizes.is_empty()
            || !self.colors.is_empty()
            || !self.price_ranges.is_empty()
            || !self.brands.is_empty()
            || !self.tags.is_empty()
            || self.collection.is_some()
    }
}

/// One active filter value, as shown in the removable-chip row.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveFilter {
    Size(String),
    Color(ColorChoice),
    Price(PriceRange),
    Brand(String),
    Tag(String),
    Collection(String),
}

impl ActiveFilter {
    /// Chip label (e.g., "Size: M").
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Size(size) => format!("Size: {size}"),
            Self::Color(color) => format!("Color: {}", color.name),
            Self::Price(range) => format!("Price: {}", range.label()),
            Self::Brand(brand) => format!("Brand: {brand}"),
            Self::Tag(tag) => format!("Tag: {tag}"),
            Self::Collection(collection) => format!("Collection: {collection}"),
        }
    }
}

// =============================================================================
// FilterEngine
// =============================================================================

/// Flip membership of `value` in a selection set.
fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if set.contains(&value) {
        set.remove(&value);
    } else {
        set.insert(value);
    }
}

/// Holds the active selection and derives the visible product subset.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    selection: FilterSelection,
}

impl FilterEngine {
    /// Engine with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Flip a size in or out of the selection.
    pub fn toggle_size(&mut self, size: impl Into<String>) {
        toggle(&mut self.selection.sizes, size.into());
    }

    /// Flip a color in or out of the selection.
    pub fn toggle_color(&mut self, color: ColorChoice) {
        toggle(&mut self.selection.colors, color);
    }

    /// Flip a price range in or out of the selection.
    pub fn toggle_price_range(&mut self, range: PriceRange) {
        toggle(&mut self.selection.price_ranges, range);
    }

    /// Flip a brand in or out of the selection.
    pub fn toggle_brand(&mut self, brand: impl Into<String>) {
        toggle(&mut self.selection.brands, brand.into());
    }

    /// Flip a tag in or out of the selection.
    pub fn toggle_tag(&mut self, tag: impl Into<String>) {
        toggle(&mut self.selection.tags, tag.into());
    }

    /// Select a collection; re-selecting the current one or selecting the
    /// "All products" sentinel clears the constraint.
    pub fn select_collection(&mut self, collection: impl Into<String>) {
        let collection = collection.into();
        if collection == ALL_PRODUCTS
            || self.selection.collection.as_deref() == Some(collection.as_str())
        {
            self.selection.collection = None;
        } else {
            self.selection.collection = Some(collection);
        }
    }

    /// Replace the active sort key.
    pub fn set_sort(&mut self, sort: Option<SortKey>) {
        self.selection.sort = sort;
    }

    /// Empty every category and unset sort and collection.
    pub fn clear_all(&mut self) {
        self.selection = FilterSelection::default();
    }

    /// Active filter values in display order (the chip row).
    #[must_use]
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        let sel = &self.selection;
        let mut filters = Vec::new();
        filters.extend(sel.sizes.iter().cloned().map(ActiveFilter::Size));
        filters.extend(sel.colors.iter().cloned().map(ActiveFilter::Color));
        filters.extend(sel.price_ranges.iter().copied().map(ActiveFilter::Price));
        filters.extend(sel.brands.iter().cloned().map(ActiveFilter::Brand));
        filters.extend(sel.tags.iter().cloned().map(ActiveFilter::Tag));
        filters.extend(sel.collection.iter().cloned().map(ActiveFilter::Collection));
        filters
    }

    /// Remove one active filter value (chip dismissal).
    pub fn remove(&mut self, filter: &ActiveFilter) {
        match filter {
            ActiveFilter::Size(size) => {
                self.selection.sizes.remove(size);
            }
            ActiveFilter::Color(color) => {
                self.selection.colors.remove(color);
            }
            ActiveFilter::Price(range) => {
                self.selection.price_ranges.remove(range);
            }
            ActiveFilter::Brand(brand) => {
                self.selection.brands.remove(brand);
            }
            ActiveFilter::Tag(tag) => {
                self.selection.tags.remove(tag);
            }
            ActiveFilter::Collection(_) => {
                self.selection.collection = None;
            }
        }
    }

    /// Produce the filtered, then sorted, product sequence.
    ///
    /// Pure over (catalog, selection): the catalog is never mutated and
    /// unchanged inputs yield an identical ordered sequence.
    #[must_use]
    pub fn apply(&self, catalog: &[Product]) -> Vec<Product> {
        let sel = &self.selection;
        let mut result: Vec<Product> = catalog
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();

        if let Some(sort) = sel.sort {
            // Stable sort: ties keep their filtered order.
            match sort {
                SortKey::Newest => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
                SortKey::PriceAscending => {
                    result.sort_by(|a, b| a.effective_price().cmp(&b.effective_price()));
                }
                SortKey::PriceDescending => {
                    result.sort_by(|a, b| b.effective_price().cmp(&a.effective_price()));
                }
                SortKey::BestSelling => result.sort_by(|a, b| b.sales_count.cmp(&a.sales_count)),
            }
        }
        result
    }

    fn matches(&self, product: &Product) -> bool {
        let sel = &self.selection;

        if !sel.sizes.is_empty() && !product.sizes.iter().any(|s| sel.sizes.contains(s)) {
            return false;
        }
        if !sel.colors.is_empty()
            && !product
                .colors
                .iter()
                .any(|c| sel.colors.iter().any(|choice| choice.value == *c))
        {
            return false;
        }
        if !sel.price_ranges.is_empty() {
            let price = product.effective_price();
            if !sel.price_ranges.iter().any(|range| range.contains(price)) {
                return false;
            }
        }
        if !sel.brands.is_empty() && !sel.brands.contains(&product.brand) {
            return false;
        }
        if !sel.tags.is_empty() && !product.tags.iter().any(|t| sel.tags.contains(t)) {
            return false;
        }
        if let Some(collection) = &sel.collection
            && collection != ALL_PRODUCTS
            && product.collection.as_ref() != Some(collection)
        {
            return false;
        }
        true
    }
}

// =============================================================================
// Facets
// =============================================================================

/// Unique sizes across the catalog in canonical S..XXL order; unknown labels
/// follow alphabetically.
#[must_use]
pub fn size_facets(catalog: &[Product]) -> Vec<String> {
    let unique: BTreeSet<&str> = catalog
        .iter()
        .flat_map(|p| p.sizes.iter().map(String::as_str))
        .collect();
    let mut sizes: Vec<String> = unique.into_iter().map(str::to_string).collect();
    sizes.sort_by_key(|size| {
        SIZE_ORDER
            .iter()
            .position(|known| *known == size.as_str())
            .map_or((1, size.clone()), |rank| (0, format!("{rank:02}")))
    });
    sizes
}

/// Unique color choices across the catalog, first-seen order preserved.
#[must_use]
pub fn color_facets(catalog: &[Product]) -> Vec<ColorChoice> {
    let mut seen = BTreeSet::new();
    let mut colors = Vec::new();
    for product in catalog {
        for (index, value) in product.colors.iter().enumerate() {
            let choice = ColorChoice::new(
                value.clone(),
                product.color_name(index).map(str::to_string),
            );
            if seen.insert(choice.clone()) {
                colors.push(choice);
            }
        }
    }
    colors
}

/// Unique brands across the catalog, sorted.
#[must_use]
pub fn brand_facets(catalog: &[Product]) -> Vec<String> {
    let unique: BTreeSet<String> = catalog
        .iter()
        .filter(|p| !p.brand.is_empty())
        .map(|p| p.brand.clone())
        .collect();
    unique.into_iter().collect()
}

/// Unique tags across the catalog, sorted.
#[must_use]
pub fn tag_facets(catalog: &[Product]) -> Vec<String> {
    let unique: BTreeSet<String> = catalog
        .iter()
        .flat_map(|p| p.tags.iter().cloned())
        .collect();
    unique.into_iter().collect()
}

/// Collections across the catalog, the "All products" sentinel first.
#[must_use]
pub fn collection_facets(catalog: &[Product]) -> Vec<String> {
    let mut collections = vec![ALL_PRODUCTS.to_string()];
    for product in catalog {
        if let Some(collection) = &product.collection
            && !collections.contains(collection)
        {
            collections.push(collection.clone());
        }
    }
    collections
}

/// Case-insensitive title search (the header search box). A blank query
/// matches nothing.
#[must_use]
pub fn search_titles<'a>(catalog: &'a [Product], query: &str) -> Vec<&'a Product> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    catalog
        .iter()
        .filter(|p| p.title.to_lowercase().contains(&query))
        .collect()
}
