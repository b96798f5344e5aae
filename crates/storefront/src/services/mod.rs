//! Application services composed over the stores.

pub mod checkout;

pub use checkout::{CheckoutError, CheckoutService, DeliveryAddress};
