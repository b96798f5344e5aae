//! FoodFlame Storefront - headless food-ordering engine.
//!
//! This binary wires the engine together for local use:
//!
//! - Flat key-value files under the data directory for users, session,
//!   and cart
//! - Public meal and drink APIs for the browsable menu
//! - `tracing` for logs and user-facing notifications

#![cfg_attr(not(test), forbid(unsafe_code))]

use foodflame_storefront::catalog::MenuFilter;
use foodflame_storefront::config::StorefrontConfig;
use foodflame_storefront::models::Category;
use foodflame_storefront::state::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "foodflame_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(data_dir = %config.data_dir.display(), "starting storefront");

    // Build application state, restoring any persisted session and basket
    let state = AppState::from_config(config).expect("Failed to initialize application state");

    match state.accounts().current_user() {
        Some(user) => tracing::info!(user = %user.email, "restored session"),
        None => tracing::info!("no active session"),
    }
    tracing::info!(
        lines = state.cart().items().len(),
        items = state.cart().item_count(),
        "restored basket"
    );

    // Assemble the menu from the upstream providers
    let menu = state.menu().fetch_menu().await;
    tracing::info!(items = menu.len(), "menu assembled");

    for category in Category::ALL {
        let count = MenuFilter::by_category(category).apply(&menu).len();
        tracing::info!(category = %category, count, "menu category");
    }
}
