//! Order types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use foodflame_core::{OrderId, OrderStatus};

use super::cart::CartItem;
use super::user::Address;

/// A placed order.
///
/// Everything here is a snapshot taken at purchase time: the line items
/// and the delivery address are embedded by value, so later edits to the
/// catalog or the owner's address book never alter order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<CartItem>,
    /// Subtotal plus delivery fee plus tax, fixed at purchase time.
    pub total: Decimal,
    pub address: Address,
    /// Stays `pending` within this system; advancement belongs to an
    /// external fulfillment collaborator.
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}
