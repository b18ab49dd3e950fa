//! Directory-backed storage backend.
//!
//! Each slot is a file `<key>.json` inside the origin directory. Writes go
//! to a sibling temp file that is renamed over the slot, so a reader never
//! observes a half-written payload.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{StorageBackend, StorageError};

const SLOT_EXTENSION: &str = "json";

/// A storage origin rooted at a directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Open (creating if needed) the origin directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StorageError::Io {
            key: root.display().to_string(),
            source,
        })?;
        Ok(Self { root })
    }

    /// The origin directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.root.join(format!("{key}.{SLOT_EXTENSION}")))
    }
}

fn io_error(key: &str) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        key: key.to_owned(),
        source,
    }
}

impl StorageBackend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key)(e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        let tmp = path.with_extension(format!("{SLOT_EXTENSION}.tmp"));
        fs::write(&tmp, value).map_err(io_error(key))?;
        fs::rename(&tmp, &path).map_err(io_error(key))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key)(e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_origin() -> FileBackend {
        let dir = std::env::temp_dir().join(format!("shopeasy-store-{}", uuid::Uuid::new_v4()));
        FileBackend::open(dir).unwrap()
    }

    #[test]
    fn test_missing_slot_is_none() {
        let backend = temp_origin();
        assert_eq!(backend.get_item("cart").unwrap(), None);
    }

    #[test]
    fn test_set_get_remove() {
        let backend = temp_origin();
        backend.set_item("lang", "\"HI\"").unwrap();
        assert_eq!(backend.get_item("lang").unwrap().as_deref(), Some("\"HI\""));
        assert!(backend.root().join("lang.json").exists());

        backend.remove_item("lang").unwrap();
        assert_eq!(backend.get_item("lang").unwrap(), None);
        backend.remove_item("lang").unwrap();

        fs::remove_dir_all(backend.root()).unwrap();
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let backend = temp_origin();
        assert!(matches!(
            backend.set_item("../escape", "1"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(
            backend.get_item(""),
            Err(StorageError::InvalidKey(_))
        ));
        fs::remove_dir_all(backend.root()).unwrap();
    }

    #[test]
    fn test_survives_reopen() {
        let backend = temp_origin();
        backend.set_item("pin", "\"400001\"").unwrap();
        let reopened = FileBackend::open(backend.root()).unwrap();
        assert_eq!(
            reopened.get_item("pin").unwrap().as_deref(),
            Some("\"400001\"")
        );
        fs::remove_dir_all(backend.root()).unwrap();
    }
}
