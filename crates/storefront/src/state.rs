//! Application state shared across the storefront.

use std::sync::Arc;

use crate::catalog::MenuClient;
use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::notify::{Notifier, TracingNotifier};
use crate::storage::LocalStore;
use crate::stores::{AccountStore, CartStore};

/// Application state shared across all storefront surfaces.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the stores, the catalog client, and
/// configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    storage: LocalStore,
    accounts: AccountStore,
    cart: CartStore,
    menu: MenuClient,
}

impl AppState {
    /// Create a new application state, restoring persisted session and
    /// basket state.
    ///
    /// Notifications go through `notifier`; the binary passes
    /// [`TracingNotifier`].
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory or its key files cannot be
    /// read.
    pub fn new(
        config: StorefrontConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AppError> {
        let storage = LocalStore::open(&config.data_dir)?;
        let accounts = AccountStore::open(storage.clone(), notifier.clone())?;
        let cart = CartStore::open(storage.clone(), notifier)?;
        let menu = MenuClient::new(config.catalog.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                storage,
                accounts,
                cart,
                menu,
            }),
        })
    }

    /// Create a state with the default tracing-backed notifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory or its key files cannot be
    /// read.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, AppError> {
        Self::new(config, Arc::new(TracingNotifier))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the local key-value store.
    #[must_use]
    pub fn storage(&self) -> &LocalStore {
        &self.inner.storage
    }

    /// Get a reference to the account store.
    #[must_use]
    pub fn accounts(&self) -> &AccountStore {
        &self.inner.accounts
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    /// Get a reference to the menu catalog client.
    #[must_use]
    pub fn menu(&self) -> &MenuClient {
        &self.inner.menu
    }
}
