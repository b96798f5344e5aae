//! Integration tests for FoodFlame.
//!
//! Everything runs against a throwaway data directory, so the tests need
//! no network and no external services. Each [`TestContext`] owns its own
//! directory; `restart` rebuilds the application state over the same
//! directory to exercise persistence.
//!
//! # Test Categories
//!
//! - `storefront_flow` - register, basket, and checkout journeys
//! - `persistence` - state surviving a restart

use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use foodflame_storefront::config::{CatalogConfig, StorefrontConfig};
use foodflame_storefront::notify::RecordingNotifier;
use foodflame_storefront::state::AppState;

/// Build a storefront configuration rooted at `data_dir`.
///
/// Provider URLs point at an unroutable port so no test ever leaves the
/// machine.
#[must_use]
pub fn config_for(data_dir: &Path) -> StorefrontConfig {
    StorefrontConfig {
        data_dir: data_dir.to_path_buf(),
        catalog: CatalogConfig {
            mealdb_base_url: "http://127.0.0.1:1/api"
                .parse()
                .expect("static test URL must parse"),
            cocktaildb_base_url: "http://127.0.0.1:1/api"
                .parse()
                .expect("static test URL must parse"),
        },
    }
}

/// A storefront over a throwaway data directory.
pub struct TestContext {
    dir: TempDir,
    pub notifier: Arc<RecordingNotifier>,
    pub state: AppState,
}

impl TestContext {
    /// Create a fresh storefront with an empty data directory.
    #[must_use]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create test data directory");
        let notifier = Arc::new(RecordingNotifier::new());
        let state = AppState::new(config_for(dir.path()), notifier.clone())
            .expect("Failed to initialize application state");
        Self {
            dir,
            notifier,
            state,
        }
    }

    /// Rebuild the application state over the same data directory,
    /// simulating a process restart.
    pub fn restart(&mut self) {
        self.notifier = Arc::new(RecordingNotifier::new());
        self.state = AppState::new(config_for(self.dir.path()), self.notifier.clone())
            .expect("Failed to reopen application state");
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
