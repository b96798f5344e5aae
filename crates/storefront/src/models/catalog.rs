//! Catalog item types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use foodflame_core::ItemId;

/// The closed set of menu categories.
///
/// Serialized by variant name, matching the category labels in persisted
/// carts and orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Pizza,
    Burgers,
    Chinese,
    Desserts,
    Beverages,
}

impl Category {
    /// Every category, in menu display order.
    pub const ALL: [Self; 5] = [
        Self::Pizza,
        Self::Burgers,
        Self::Chinese,
        Self::Desserts,
        Self::Beverages,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pizza => write!(f, "Pizza"),
            Self::Burgers => write!(f, "Burgers"),
            Self::Chinese => write!(f, "Chinese"),
            Self::Desserts => write!(f, "Desserts"),
            Self::Beverages => write!(f, "Beverages"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pizza" => Ok(Self::Pizza),
            "Burgers" => Ok(Self::Burgers),
            "Chinese" => Ok(Self::Chinese),
            "Desserts" => Ok(Self::Desserts),
            "Beverages" => Ok(Self::Beverages),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

/// A browsable menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Image URL for the menu card.
    pub image: String,
    pub category: Category,
    /// Star rating, one decimal place.
    pub rating: f64,
    /// Human-readable preparation window, e.g. "15-20 min".
    pub prep_time: String,
}
