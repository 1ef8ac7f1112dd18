//! Removable chips for the active-filter row.

use crate::filter::{ActiveFilter, FilterEngine};

/// One chip in the selected-filters row.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterChip {
    /// Display label (e.g., "Size: M", "Clear All").
    pub label: String,
    /// The filter this chip removes; `None` for the clear-all chip.
    pub filter: Option<ActiveFilter>,
}

/// Chips for the current selection, ending with a "Clear All" chip. Empty
/// when nothing is selected (the row is hidden).
#[must_use]
pub fn filter_chips(engine: &FilterEngine) -> Vec<FilterChip> {
    let active = engine.active_filters();
    if active.is_empty() {
        return Vec::new();
    }

    let mut chips: Vec<FilterChip> = active
        .into_iter()
        .map(|filter| FilterChip {
            label: filter.label(),
            filter: Some(filter),
        })
        .collect();
    chips.push(FilterChip {
        label: "Clear All".to_string(),
        filter: None,
    });
    chips
}
