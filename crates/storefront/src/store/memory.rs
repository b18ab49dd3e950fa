//! In-process storage backend.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use super::{StorageBackend, StorageError};

#[derive(Debug, Default)]
struct MemoryInner {
    slots: BTreeMap<String, String>,
    writes: u64,
}

/// A shared in-memory origin.
///
/// Clones are handles to the same slots, so a test can keep one handle and
/// inspect what a component persisted through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<RwLock<MemoryInner>>,
}

impl MemoryBackend {
    /// Create an empty origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set_item`/`remove_item` calls so far.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.inner.read().map_or(0, |inner| inner.writes)
    }

    /// Names of all occupied slots, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|inner| inner.slots.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl StorageBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let inner = self.inner.read().map_err(|_| StorageError::Poisoned)?;
        Ok(inner.slots.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.write().map_err(|_| StorageError::Poisoned)?;
        inner.slots.insert(key.to_owned(), value.to_owned());
        inner.writes += 1;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut inner = self.inner.write().map_err(|_| StorageError::Poisoned)?;
        inner.slots.remove(key);
        inner.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_slots() {
        let a = MemoryBackend::new();
        let b = a.clone();
        a.set_item("cart", "[]").unwrap();
        assert_eq!(b.get_item("cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(b.keys(), vec!["cart".to_string()]);
    }

    #[test]
    fn test_write_count() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.write_count(), 0);
        backend.set_item("pin", "\"1\"").unwrap();
        backend.remove_item("pin").unwrap();
        assert_eq!(backend.write_count(), 2);
        backend.get_item("pin").unwrap();
        assert_eq!(backend.write_count(), 2);
    }
}
