//! Subcommand implementations.
//!
//! Every command writes its output to a caller-supplied writer so it can
//! be exercised against an in-memory store in tests.

pub mod account;
pub mod cart;
pub mod checkout;
pub mod prefs;
pub mod search;
pub mod wishlist;

use shopeasy_core::{Price, ProductId};
use shopeasy_storefront::notify::{Notice, Notifier};
use shopeasy_storefront::search::Catalog;
use shopeasy_storefront::store::{DurableStore, FileBackend};
use shopeasy_storefront::{Storefront, StorefrontConfig};

use crate::error::AppError;

/// Catalog used when `SHOPEASY_CATALOG` is unset.
const DEMO_CATALOG: &str = include_str!("../../catalog.yaml");

/// Prints notices to stdout as they arrive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    #[allow(clippy::print_stdout)]
    fn notify(&mut self, notice: Notice) {
        println!("{}", notice.message());
    }
}

/// Resources shared by every subcommand.
#[derive(Debug)]
pub struct Session {
    pub config: StorefrontConfig,
    pub store: DurableStore<FileBackend>,
}

impl Session {
    /// Open the data directory named by `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the directory cannot be created.
    pub fn open(config: StorefrontConfig) -> Result<Self, AppError> {
        let backend = FileBackend::open(&config.data_dir)?;
        tracing::debug!(root = %backend.root().display(), "Opened data directory");
        Ok(Self {
            config,
            store: DurableStore::new(backend),
        })
    }

    #[must_use]
    pub fn storefront(&self) -> Storefront<FileBackend, ConsoleNotifier> {
        Storefront::open(self.store.clone(), &self.config, ConsoleNotifier)
    }

    /// Configured catalog, or the built-in demo catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if the catalog cannot be read or parsed.
    pub fn catalog(&self) -> Result<Catalog, AppError> {
        let catalog = match &self.config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::from_yaml_str(DEMO_CATALOG)?,
        };
        Ok(catalog)
    }
}

/// Product details for an add command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductArgs {
    pub id: String,
    pub name: Option<String>,
    pub price: Option<String>,
}

impl ProductArgs {
    /// Fill in missing details from `catalog`.
    ///
    /// Explicit `name` and `price` win over catalog values.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Price` for an unparseable price, or
    /// `AppError::UnknownProduct` if details are missing and the catalog
    /// does not list the product.
    pub fn resolve(self, catalog: &Catalog) -> Result<(ProductId, String, Price), AppError> {
        let id = ProductId::new(self.id);
        let price = self.price.as_deref().map(str::parse::<Price>).transpose()?;
        let listed = catalog.get(&id);

        let name = self.name.or_else(|| listed.map(|p| p.name.clone()));
        let price = price.or_else(|| listed.map(|p| p.price));

        match (name, price) {
            (Some(name), Some(price)) => Ok((id, name, price)),
            _ => Err(AppError::UnknownProduct(id.into_inner())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn demo() -> Catalog {
        Catalog::from_yaml_str(DEMO_CATALOG).unwrap()
    }

    #[test]
    fn test_demo_catalog_parses() {
        assert!(!demo().products().is_empty());
    }

    #[test]
    fn test_resolve_from_catalog() {
        let args = ProductArgs {
            id: "yoga-mat".to_string(),
            name: None,
            price: None,
        };
        let (id, name, price) = args.resolve(&demo()).unwrap();
        assert_eq!(id.as_str(), "yoga-mat");
        assert_eq!(name, "Yoga Mat");
        assert_eq!(price, Price::from(899));
    }

    #[test]
    fn test_resolve_explicit_overrides() {
        let args = ProductArgs {
            id: "custom".to_string(),
            name: Some("Gift Card".to_string()),
            price: Some("250".to_string()),
        };
        let (_, name, price) = args.resolve(&demo()).unwrap();
        assert_eq!(name, "Gift Card");
        assert_eq!(price, Price::from(250));
    }

    #[test]
    fn test_resolve_unknown() {
        let args = ProductArgs {
            id: "nope".to_string(),
            name: None,
            price: Some("10".to_string()),
        };
        assert!(matches!(
            args.resolve(&demo()),
            Err(AppError::UnknownProduct(id)) if id == "nope"
        ));
    }

    #[test]
    fn test_resolve_negative_price() {
        let args = ProductArgs {
            id: "x".to_string(),
            name: Some("X".to_string()),
            price: Some("-5".to_string()),
        };
        assert!(matches!(args.resolve(&demo()), Err(AppError::Price(_))));
    }
}
