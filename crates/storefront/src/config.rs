//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOPEASY_DATA_DIR` - Directory holding the persisted slots (default: `.shopeasy`)
//! - `SHOPEASY_CONTACT_DOMAIN` - Mail domain accepted at checkout (default: `gmail.com`)
//! - `SHOPEASY_CATALOG` - Path to a YAML product catalog
//! - `SHOPEASY_CURRENCY_SYMBOL` - Symbol used when formatting prices (default: `₹`)

use std::path::PathBuf;

use thiserror::Error;

use crate::checkout::{ContactPolicy, DEFAULT_CONTACT_DOMAIN};

const DEFAULT_DATA_DIR: &str = ".shopeasy";
const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Origin directory for the file-backed store
    pub data_dir: PathBuf,
    /// Checkout contact address rule
    pub contact_policy: ContactPolicy,
    /// Product catalog to search, if any
    pub catalog_path: Option<PathBuf>,
    /// Currency symbol for formatted prices
    pub currency_symbol: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            contact_policy: ContactPolicy::default(),
            catalog_path: None,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_dir = get("SHOPEASY_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let domain = get("SHOPEASY_CONTACT_DOMAIN")
            .unwrap_or_else(|| DEFAULT_CONTACT_DOMAIN.to_string());
        let contact_policy = contact_policy(domain.trim())?;

        let catalog_path = get("SHOPEASY_CATALOG").map(PathBuf::from);
        let currency_symbol =
            get("SHOPEASY_CURRENCY_SYMBOL").unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string());

        Ok(Self {
            data_dir,
            contact_policy,
            catalog_path,
            currency_symbol,
        })
    }
}

/// Validate a contact domain and build its policy.
fn contact_policy(domain: &str) -> Result<ContactPolicy, ConfigError> {
    let invalid = |reason: &str| {
        ConfigError::InvalidEnvVar("SHOPEASY_CONTACT_DOMAIN".to_string(), reason.to_string())
    };

    if domain.contains('@') {
        return Err(invalid("must be a bare domain without '@'"));
    }
    if domain.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }
    if !domain.contains('.') {
        return Err(invalid("must contain a dot (e.g. gmail.com)"));
    }

    ContactPolicy::for_domain(domain).map_err(|e| invalid(&e.to_string()))
}
