//! Durable application stores.
//!
//! Two stores back the whole application: [`AccountStore`] owns the
//! registered-user table and the session pointer, [`CartStore`] owns the
//! active basket. Both write through to [`LocalStore`](crate::storage::LocalStore)
//! on every mutation and broadcast their current value on a `watch`
//! channel for subscribing views.

pub mod account;
pub mod cart;

pub use account::{AccountError, AccountStore};
pub use cart::CartStore;
