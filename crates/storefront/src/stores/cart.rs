//! Cart store: the active basket.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::warn;

use foodflame_core::ItemId;

use crate::models::{CartItem, FoodItem};
use crate::notify::{Notification, Notifier};
use crate::storage::{CART_KEY, LocalStore, StorageError};

/// Owns the in-progress basket for this storage scope.
///
/// Deliberately independent of the session pointer: the basket survives
/// login and logout because it lives under its own key. Derived values
/// (total, item count) are recomputed from the line list on every read,
/// never stored, so they cannot drift.
pub struct CartStore {
    storage: LocalStore,
    notifier: Arc<dyn Notifier>,
    items: watch::Sender<Vec<CartItem>>,
}

impl CartStore {
    /// Build the store and restore any persisted basket.
    ///
    /// Malformed persisted cart data is discarded and logged, matching
    /// the account store's policy for its keys.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the cart key cannot be read.
    pub fn open(storage: LocalStore, notifier: Arc<dyn Notifier>) -> Result<Self, StorageError> {
        let items = match storage.get::<Vec<CartItem>>(CART_KEY) {
            Ok(items) => items.unwrap_or_default(),
            Err(err) if err.is_parse() => {
                warn!(error = %err, "discarding malformed persisted cart");
                storage.remove(CART_KEY)?;
                Vec::new()
            }
            Err(err) => return Err(err),
        };

        let (items, _) = watch::channel(items);
        Ok(Self {
            storage,
            notifier,
            items,
        })
    }

    /// Current basket lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.items.borrow().clone()
    }

    /// Watch the basket; receivers observe every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.items.subscribe()
    }

    /// Sum of price times quantity over all lines, recomputed.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.borrow().iter().map(CartItem::line_total).sum()
    }

    /// Sum of quantities over all lines, recomputed.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.borrow().iter().map(|line| line.quantity).sum()
    }

    /// Add an item, merging into an existing line for the same ID.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write-through fails.
    pub fn add_item(&self, item: &FoodItem) -> Result<(), StorageError> {
        let mut items = self.items();

        if let Some(line) = items.iter_mut().find(|line| line.item.id == item.id) {
            line.quantity += 1;
            self.notifier.notify(Notification::info(
                "Item updated",
                format!("{} quantity increased in cart", item.name),
            ));
        } else {
            items.push(CartItem::new(item.clone()));
            self.notifier.notify(Notification::info(
                "Added to cart",
                format!("{} added to your cart", item.name),
            ));
        }

        self.commit(items)
    }

    /// Remove the line with this ID. Silent no-op if absent.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write-through fails.
    pub fn remove_item(&self, id: &ItemId) -> Result<(), StorageError> {
        let mut items = self.items();

        let Some(pos) = items.iter().position(|line| &line.item.id == id) else {
            return Ok(());
        };
        let removed = items.remove(pos);
        self.notifier.notify(Notification::info(
            "Item removed",
            format!("{} removed from cart", removed.item.name),
        ));

        self.commit(items)
    }

    /// Set a line's quantity; zero or negative removes the line.
    ///
    /// No upper bound is enforced.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write-through fails.
    pub fn update_quantity(&self, id: &ItemId, quantity: i64) -> Result<(), StorageError> {
        let Ok(quantity) = u32::try_from(quantity) else {
            return self.remove_item(id);
        };
        if quantity == 0 {
            return self.remove_item(id);
        }

        let mut items = self.items();
        if let Some(line) = items.iter_mut().find(|line| &line.item.id == id) {
            line.quantity = quantity;
        }

        self.commit(items)
    }

    /// Empty the basket.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write-through fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.commit(Vec::new())?;
        self.notifier.notify(Notification::info(
            "Cart cleared",
            "All items removed from cart",
        ));
        Ok(())
    }

    /// Write through to storage, then broadcast.
    fn commit(&self, items: Vec<CartItem>) -> Result<(), StorageError> {
        self.storage.set(CART_KEY, &items)?;
        self.items.send_replace(items);
        Ok(())
    }
}
