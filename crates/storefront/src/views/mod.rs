//! View models: pure projections of store state.
//!
//! Everything here is re-derived from current cart/filter/catalog state on
//! each render; nothing caches prior render output. Pagination state is the
//! one exception - the grid owns its current page, and resets it whenever
//! the underlying product set changes.

mod cart;
mod chips;
mod grid;
mod product;

pub use cart::{AddToCartButton, CartLineView, CartPanelView, CheckoutView};
pub use chips::{FilterChip, filter_chips};
pub use grid::{PageControl, ProductGrid};
pub use product::{PriceView, ProductCardView, RatingView};
