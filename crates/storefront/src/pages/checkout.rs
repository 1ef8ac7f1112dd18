//! The checkout summary page.

use crate::cart::CartStore;
use crate::storage::SharedStore;
use crate::views::CheckoutView;

/// Controller for the checkout page: a pure projection of the persisted
/// cart, re-rendered after every cart event.
pub struct CheckoutPage {
    cart: CartStore,
}

impl CheckoutPage {
    /// Load the persisted cart.
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self {
            cart: CartStore::new(store),
        }
    }

    /// The cart store owned by this page.
    #[must_use]
    pub fn cart(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Derive the checkout summary from current cart state.
    #[must_use]
    pub fn render(&self) -> CheckoutView {
        CheckoutView::from(self.cart.cart())
    }
}
