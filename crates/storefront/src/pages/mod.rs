//! Page controllers: thin glue between DOM-equivalent events and the stores.
//!
//! Each controller owns its stores for the lifetime of the page and exposes
//! a `render()` that derives the page's view model from current state.

mod checkout;
mod detail;
mod listing;

pub use checkout::CheckoutPage;
pub use detail::{DetailPage, DetailView, GalleryView, OptionView};
pub use listing::{Facets, ListingPage, ListingView};
