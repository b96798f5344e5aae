//! Unified error handling.
//!
//! Provides a unified `AppError` type so the binary and callers composing
//! several subsystems can return one error. Individual stores keep their
//! own error enums for callers that want finer matching.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::services::CheckoutError;
use crate::storage::StorageError;
use crate::stores::AccountError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Local key-value storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Account operation failed.
    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    /// Checkout operation failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Catalog provider operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
