//! Product catalog and category-aware search.
//!
//! The catalog is a YAML document:
//!
//! ```yaml
//! products:
//!   - id: tws-earbuds
//!     name: Wireless Earbuds
//!     price: 1499
//!     category: electronics
//! ```
//!
//! Search is a case-insensitive substring match on the product name,
//! combined with an exact category filter. Results keep catalog order.

use std::convert::Infallible;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use shopeasy_core::{CategoryId, Price, ProductId};

use crate::notify::{Notice, Notifier};

/// Errors that can occur when loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// A product card on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: CategoryId,
}

/// Category selection in the search bar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(CategoryId),
}

impl CategoryFilter {
    fn admits(&self, category: &CategoryId) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Ok(Self::Only(CategoryId::new(s)))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => write!(f, "{category}"),
        }
    }
}

/// Products available for search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a catalog document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the YAML is malformed.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&yaml)?;
        tracing::debug!(products = catalog.products.len(), "Catalog loaded");
        Ok(catalog)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Products whose name contains `query` (ignoring case) within `filter`.
    /// A blank query matches every product.
    #[must_use]
    pub fn search(&self, query: &str, filter: &CategoryFilter) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(|product| filter.admits(&product.category))
            .filter(|product| needle.is_empty() || product.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// [`search`](Self::search), emitting [`Notice::NoSearchResults`] when
    /// nothing matched.
    pub fn search_with(
        &self,
        query: &str,
        filter: &CategoryFilter,
        notifier: &mut impl Notifier,
    ) -> Vec<&Product> {
        let hits = self.search(query, filter);
        if hits.is_empty() {
            notifier.notify(Notice::NoSearchResults);
        }
        hits
    }
}
