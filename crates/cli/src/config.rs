//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MY_SHOP_STORE_PATH` - Storage file (default: `.my-shop/storage.json`)
//! - `MY_SHOP_CART_KEY` - Key holding the cart (default: `cart`)
//! - `MY_SHOP_WISHLIST_KEY` - Key holding the wishlist (default: `wishlist`)

use std::path::PathBuf;

use my_shop_cart::StorageKeys;
use thiserror::Error;

const DEFAULT_STORE_PATH: &str = ".my-shop/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Path of the JSON storage file
    pub store_path: PathBuf,
    /// Keys for the cart and wishlist inside the storage file
    pub keys: StorageKeys,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but empty, or if the cart
    /// and wishlist keys collide.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store_path = PathBuf::from(get_non_empty(
            &get,
            "MY_SHOP_STORE_PATH",
            DEFAULT_STORE_PATH,
        )?);
        let cart = get_non_empty(&get, "MY_SHOP_CART_KEY", StorageKeys::DEFAULT_CART)?;
        let wishlist = get_non_empty(
            &get,
            "MY_SHOP_WISHLIST_KEY",
            StorageKeys::DEFAULT_WISHLIST,
        )?;

        if cart == wishlist {
            return Err(ConfigError::InvalidEnvVar(
                "MY_SHOP_WISHLIST_KEY".to_string(),
                format!("must differ from the cart key {cart:?}"),
            ));
        }

        Ok(Self {
            store_path,
            keys: StorageKeys { cart, wishlist },
        })
    }

    /// Replace the storage path, e.g. from a command-line flag.
    #[must_use]
    pub fn with_store_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.store_path = path;
        }
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable, falling back to `default` when unset. Set-but-blank is an error.
fn get_non_empty(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<String, ConfigError> {
    match get(key) {
        None => Ok(default.to_string()),
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be empty".to_string(),
        )),
        Some(value) => Ok(value.trim().to_string()),
    }
}
