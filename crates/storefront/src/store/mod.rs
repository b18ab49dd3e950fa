//! Durable key/value storage.
//!
//! [`DurableStore`] is a failure-tolerant typed wrapper over a synchronous
//! per-origin [`StorageBackend`]. Reads never fail: a missing slot or a
//! payload that does not decode yields the caller's fallback. Writes are
//! fire-and-forget; backend failures are logged and swallowed.
//!
//! Two backends are provided:
//! - [`MemoryBackend`] - process-local map, cloneable handle (tests, embedding)
//! - [`FileBackend`] - one JSON file per key inside a data directory (CLI)

mod file;
mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileBackend;
pub use memory::MemoryBackend;

/// Storage slot names.
pub mod keys {
    /// Ordered list of cart line items.
    pub const CART: &str = "cart";

    /// Ordered list of wishlist entries.
    pub const WISHLIST: &str = "wishlist";

    /// Signed-in user profile.
    pub const USER: &str = "user";

    /// Delivery location PIN code.
    pub const PIN: &str = "pin";

    /// Interface language code.
    pub const LANG: &str = "lang";
}

/// Errors raised by storage backends.
///
/// These never escape [`DurableStore`]; they are logged and the operation
/// degrades to a fallback or a dropped write.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters the backend cannot store.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A previous holder of the backend lock panicked.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A synchronous string key/value store scoped to one origin.
///
/// Methods take `&self`; backends are handles to shared storage so several
/// components can hold the same origin.
pub trait StorageBackend {
    /// Read a slot. `Ok(None)` if the slot is absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the content of a slot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a slot. Deleting an absent slot succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Typed JSON view over a [`StorageBackend`].
#[derive(Debug, Clone)]
pub struct DurableStore<B> {
    backend: B,
}

impl<B: StorageBackend> DurableStore<B> {
    /// Wrap a backend.
    #[must_use]
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Get a reference to the underlying backend.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Read and decode a slot, returning `fallback` if the slot is absent,
    /// unreadable, or does not decode as `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return fallback,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read storage slot");
                return fallback;
            }
        };

        serde_json::from_str::<Option<T>>(&raw)
            .map_err(|e| {
                tracing::warn!(key, error = %e, "Discarding undecodable storage slot");
            })
            .ok()
            .flatten()
            .unwrap_or(fallback)
    }

    /// [`get`](Self::get) with `T::default()` as the fallback.
    pub fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.get(key, T::default())
    }

    /// Encode `value` and replace the slot.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::error!(key, error = %e, "Failed to encode storage slot");
                return;
            }
        };

        if let Err(e) = self.backend.set_item(key, &encoded) {
            tracing::error!(key, error = %e, "Failed to write storage slot");
        }
    }

    /// Delete the slot.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove_item(key) {
            tracing::error!(key, error = %e, "Failed to remove storage slot");
        }
    }
}
