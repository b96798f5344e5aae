//! Domain model types.
//!
//! All persisted records serialize camelCase to match the on-disk schema
//! written by earlier versions of the storefront.

pub mod cart;
pub mod catalog;
pub mod order;
pub mod user;

pub use cart::CartItem;
pub use catalog::{Category, FoodItem};
pub use order::Order;
pub use user::{Address, NewAddress, ProfileUpdate, User};
