//! Integration tests for ShopEasy.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopeasy-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - cart and wishlist behavior through the dispatcher
//! - `storefront_checkout` - one-time-code checkout end to end
//! - `storefront_persistence` - reload from both storage backends
//!
//! The helpers below give each test its own data directory.

use std::path::{Path, PathBuf};

use shopeasy_storefront::notify::RecordingNotifier;
use shopeasy_storefront::store::{DurableStore, FileBackend, StorageError};
use shopeasy_storefront::{Storefront, StorefrontConfig};
use uuid::Uuid;

/// A unique directory under the system temp dir, removed on drop.
#[derive(Debug)]
pub struct TempDataDir {
    path: PathBuf,
}

impl TempDataDir {
    #[must_use]
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!("shopeasy-it-{}", Uuid::new_v4()));
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a file-backed store rooted here.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the directory cannot be created.
    pub fn store(&self) -> Result<DurableStore<FileBackend>, StorageError> {
        Ok(DurableStore::new(FileBackend::open(&self.path)?))
    }

    /// Open a storefront over this directory with a recording notifier.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the directory cannot be created.
    pub fn storefront(
        &self,
    ) -> Result<Storefront<FileBackend, RecordingNotifier>, StorageError> {
        let config = StorefrontConfig {
            data_dir: self.path.clone(),
            ..StorefrontConfig::default()
        };
        Ok(Storefront::open(self.store()?, &config, RecordingNotifier::new()))
    }
}

impl Default for TempDataDir {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempDataDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
