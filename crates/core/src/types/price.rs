//! Money formatting using decimal arithmetic.
//!
//! All price arithmetic in the workspace uses [`rust_decimal::Decimal`];
//! amounts stay exact internally and are only rounded at the display
//! boundary.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format a USD amount for display (e.g., "$19.99").
///
/// Rounds to 2 decimal places, midpoints away from zero. Internal amounts
/// are never rounded; this is the display boundary.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}
