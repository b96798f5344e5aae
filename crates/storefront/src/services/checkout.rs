//! Checkout service.
//!
//! Turns the active basket into an immutable [`Order`] on the current
//! user's record, then empties the basket.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;

use foodflame_core::{AddressId, OrderId, OrderStatus};

use crate::models::{Address, NewAddress, Order, ProfileUpdate};
use crate::notify::{Notification, Notifier};
use crate::storage::StorageError;
use crate::stores::{AccountError, AccountStore, CartStore};

/// Flat delivery fee applied to every order.
#[must_use]
pub fn delivery_fee() -> Decimal {
    Decimal::new(299, 2)
}

/// Tax rate applied to the subtotal.
#[must_use]
pub fn tax_rate() -> Decimal {
    Decimal::new(8, 2)
}

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout requires an authenticated session.
    #[error("sign in to place an order")]
    NotAuthenticated,

    /// The basket is empty.
    #[error("the basket is empty")]
    EmptyBasket,

    /// The selected saved address does not exist.
    #[error("address not found")]
    AddressNotFound,

    /// Account store failure.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Storage layer failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Where to deliver an order.
#[derive(Debug, Clone)]
pub enum DeliveryAddress {
    /// A saved address, by ID.
    Saved(AddressId),
    /// A freshly entered address, optionally saved to the profile.
    New { address: NewAddress, save: bool },
}

/// Checkout over the account and cart stores.
pub struct CheckoutService<'a> {
    accounts: &'a AccountStore,
    cart: &'a CartStore,
    notifier: Arc<dyn Notifier>,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub fn new(
        accounts: &'a AccountStore,
        cart: &'a CartStore,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            accounts,
            cart,
            notifier,
        }
    }

    /// The address to pre-select: the default, else the first saved one.
    #[must_use]
    pub fn suggested_address(&self) -> Option<Address> {
        let user = self.accounts.current_user()?;
        user.default_address()
            .or_else(|| user.addresses.first())
            .cloned()
    }

    /// Place an order for the current basket.
    ///
    /// The order embeds value snapshots of the basket lines and delivery
    /// address, carries `total = subtotal + delivery fee + subtotal x tax`,
    /// starts `pending`, and is appended to the user's order history.
    /// The basket is cleared afterwards.
    ///
    /// # Errors
    ///
    /// `NotAuthenticated` without a session, `EmptyBasket` for an empty
    /// cart, `AddressNotFound` for an unknown saved-address ID.
    pub fn place_order(&self, delivery: DeliveryAddress) -> Result<Order, CheckoutError> {
        let user = self
            .accounts
            .current_user()
            .ok_or(CheckoutError::NotAuthenticated)?;

        let items = self.cart.items();
        if items.is_empty() {
            return Err(CheckoutError::EmptyBasket);
        }

        let address = match delivery {
            DeliveryAddress::Saved(id) => user
                .addresses
                .iter()
                .find(|a| a.id == id)
                .cloned()
                .ok_or(CheckoutError::AddressNotFound)?,
            DeliveryAddress::New { address, save } => {
                let is_default = user.addresses.is_empty() || save;
                let address = address.into_address(is_default);
                if save {
                    // Saving demotes every existing default.
                    let mut addresses: Vec<Address> = user
                        .addresses
                        .iter()
                        .cloned()
                        .map(|mut a| {
                            a.is_default = false;
                            a
                        })
                        .collect();
                    addresses.push(address.clone());
                    self.accounts
                        .update_profile(ProfileUpdate::addresses(addresses))?;
                }
                address
            }
        };

        let subtotal = self.cart.total();
        let order = Order {
            id: OrderId::generate(),
            items,
            total: subtotal + delivery_fee() + subtotal * tax_rate(),
            address,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };

        // Re-read so a just-saved address is not lost from the row.
        let mut orders = self
            .accounts
            .current_user()
            .ok_or(CheckoutError::NotAuthenticated)?
            .orders;
        orders.push(order.clone());
        self.accounts.update_profile(ProfileUpdate::orders(orders))?;

        self.cart.clear()?;
        self.notifier.notify(Notification::info(
            "Order placed successfully!",
            "Your delicious food is being prepared",
        ));

        Ok(order)
    }
}
