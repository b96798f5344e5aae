//! Basket line types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::FoodItem;

/// A catalog item selected into the basket.
///
/// The basket holds at most one entry per distinct item ID; repeat
/// selections raise the quantity instead of duplicating the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub item: FoodItem,
    /// Always at least 1; a zero quantity removes the line instead.
    pub quantity: u32,
}

impl CartItem {
    /// Wrap a freshly selected item with quantity 1.
    #[must_use]
    pub const fn new(item: FoodItem) -> Self {
        Self { item, quantity: 1 }
    }

    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.item.price * Decimal::from(self.quantity)
    }
}
