//! Cart store: persisted cart plus change notification.
//!
//! The store owns the [`Cart`] exclusively. Every mutation persists the new
//! state synchronously, then notifies subscribed observers so independent
//! renderings (cart panel, totals, add-to-cart buttons) reconcile without
//! coupling to each other. Observers register explicitly and get an
//! unsubscribe handle back; there is no global event bus.

use rust_decimal::Decimal;

use crate::storage::{self, SharedStore, keys};
use crate::types::{Cart, Decremented, LineKey, Product};

/// Change notification broadcast after a cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// Cart contents changed; re-derive any rendering of items or totals.
    Updated,
    /// A specific line left the cart (explicit removal or a decrement that
    /// hit zero). Followed by [`CartEvent::Updated`].
    ItemRemoved(LineKey),
    /// The cart was emptied wholesale.
    Cleared,
}

/// Handle returned by [`CartStore::subscribe`]; pass to
/// [`CartStore::unsubscribe`] to detach the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

type Listener = Box<dyn FnMut(&CartEvent)>;

/// Owner of the persisted cart.
pub struct CartStore {
    cart: Cart,
    store: SharedStore,
    listeners: Vec<(u64, Listener)>,
    next_subscription: u64,
}

impl CartStore {
    /// Load the cart persisted under the fixed cart key; corrupt or missing
    /// state loads as an empty cart.
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        let cart = storage::read_json(store.as_ref(), keys::CART).unwrap_or_default();
        Self {
            cart,
            store,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current cart state.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Sum of quantity x unit price over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// Whether a line with this identity key is in the cart.
    #[must_use]
    pub fn contains(&self, key: &LineKey) -> bool {
        self.cart.contains(key)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of a product selection (listing-page quick add).
    ///
    /// Returns the updated cart.
    pub fn add_item(
        &mut self,
        product: &Product,
        color: Option<String>,
        color_name: Option<String>,
        size: Option<String>,
    ) -> &Cart {
        self.add_item_with_quantity(product, color, color_name, size, 1)
    }

    /// Add an explicit positive quantity of a product selection (detail
    /// page, where the buyer picks quantity before adding).
    ///
    /// Returns the updated cart.
    pub fn add_item_with_quantity(
        &mut self,
        product: &Product,
        color: Option<String>,
        color_name: Option<String>,
        size: Option<String>,
        quantity: u32,
    ) -> &Cart {
        self.cart.add(product, color, color_name, size, quantity);
        self.persist();
        self.notify(&CartEvent::Updated);
        &self.cart
    }

    /// Increase a line's quantity by 1. No-op when the key is absent.
    pub fn increment(&mut self, key: &LineKey) {
        if self.cart.increment(key) {
            self.persist();
            self.notify(&CartEvent::Updated);
        }
    }

    /// Decrease a line's quantity by 1; a line at quantity 1 is removed
    /// entirely. No-op when the key is absent.
    pub fn decrement(&mut self, key: &LineKey) {
        match self.cart.decrement(key) {
            Decremented::Updated => {
                self.persist();
                self.notify(&CartEvent::Updated);
            }
            Decremented::Removed => {
                self.persist();
                self.notify(&CartEvent::ItemRemoved(key.clone()));
                self.notify(&CartEvent::Updated);
            }
            Decremented::Missing => {}
        }
    }

    /// Remove a line regardless of quantity. No-op when the key is absent.
    pub fn remove(&mut self, key: &LineKey) {
        if self.cart.remove(key) {
            self.persist();
            self.notify(&CartEvent::ItemRemoved(key.clone()));
            self.notify(&CartEvent::Updated);
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
        self.notify(&CartEvent::Cleared);
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register an observer called after every mutation's persistence.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartEvent) + 'static) -> Subscription {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        Subscription(id)
    }

    /// Detach a previously registered observer.
    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.listeners.retain(|(id, _)| *id != subscription.0);
    }

    fn persist(&self) {
        storage::write_json(self.store.as_ref(), keys::CART, &self.cart);
    }

    fn notify(&mut self, event: &CartEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}
