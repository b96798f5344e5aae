//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional and fall back to defaults:
//! - `FOODFLAME_DATA_DIR` - Directory for persisted state (default: ./data)
//! - `FOODFLAME_MEALDB_URL` - Base URL of the meal catalog API
//! - `FOODFLAME_COCKTAILDB_URL` - Base URL of the drink catalog API

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_MEALDB_URL: &str = "https://www.themealdb.com/api/json/v1/1";
const DEFAULT_COCKTAILDB_URL: &str = "https://www.thecocktaildb.com/api/json/v1/1";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the persisted key files
    pub data_dir: PathBuf,
    /// Upstream catalog API configuration
    pub catalog: CatalogConfig,
}

/// Catalog provider API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the meal API (path prefix up to the version segment)
    pub mealdb_base_url: Url,
    /// Base URL of the drink API (path prefix up to the version segment)
    pub cocktaildb_base_url: Url,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a provider URL variable is set but does
    /// not parse as an absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("FOODFLAME_DATA_DIR", DEFAULT_DATA_DIR));
        let catalog = CatalogConfig::from_env()?;

        Ok(Self { data_dir, catalog })
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            mealdb_base_url: get_base_url("FOODFLAME_MEALDB_URL", DEFAULT_MEALDB_URL)?,
            cocktaildb_base_url: get_base_url("FOODFLAME_COCKTAILDB_URL", DEFAULT_COCKTAILDB_URL)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable as a base URL, with a default value.
///
/// A trailing slash is stripped so endpoint paths can be appended
/// uniformly.
fn get_base_url(key: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = get_env_or_default(key, default);
    parse_base_url(key, &raw)
}

fn parse_base_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim_end_matches('/');
    trimmed
        .parse::<Url>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
