//! Command-line error type.

use thiserror::Error;

use shopeasy_core::PriceError;
use shopeasy_storefront::checkout::CheckoutError;
use shopeasy_storefront::config::ConfigError;
use shopeasy_storefront::search::CatalogError;
use shopeasy_storefront::services::AccountError;
use shopeasy_storefront::store::StorageError;

/// Errors surfaced by `shopeasy` subcommands.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("Invalid price: {0}")]
    Price(#[from] PriceError),

    #[error("Unknown product: {0} (pass --name and --price, or add it to the catalog)")]
    UnknownProduct(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
