//! Flat, named-key persistent storage.
//!
//! # Layout
//!
//! One JSON document per key under the configured data directory
//! (`<key>.json`), written whole on every mutation. There are no
//! transactions, no schema versioning, and no expiry.
//!
//! ## Keys
//!
//! - `users` - full table of registered [`User`](crate::models::User) records
//! - `currentUser` - denormalized copy of the active session's user
//! - `cart` - the active basket's [`CartItem`](crate::models::CartItem) list
//!
//! Exactly one logical session per storage scope is assumed; concurrent
//! writers race last-write-wins.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Storage key holding the registered-user table.
pub const USERS_KEY: &str = "users";
/// Storage key holding the active session's user record.
pub const CURRENT_USER_KEY: &str = "currentUser";
/// Storage key holding the active basket.
pub const CART_KEY: &str = "cart";

/// Errors raised by the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem read or write failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted value could not be decoded.
    ///
    /// Callers decide the recovery policy; the stores discard the
    /// corrupted key and continue with an empty default.
    #[error("malformed value under key '{key}': {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded for writing.
    #[error("failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Whether this error is a decode failure (as opposed to I/O).
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Flat key-value store backed by per-key JSON files.
///
/// Cheap to clone; clones share the same directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Open (creating if necessary) a store rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Read and decode the value under `key`.
    ///
    /// Absence is not an error: a missing key yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Parse` for malformed content and
    /// `StorageError::Io` for filesystem failures.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let raw = match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let value = serde_json::from_str(&raw).map_err(|source| StorageError::Parse {
            key: key.to_owned(),
            source,
        })?;
        Ok(Some(value))
    }

    /// Encode and write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Encode` or `StorageError::Io`.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_owned(),
            source,
        })?;
        fs::write(self.path_for(key), raw)?;
        Ok(())
    }

    /// Remove the value under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` for filesystem failures other than
    /// the key already being absent.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_missing_key_is_none() {
        let (_dir, store) = store();
        let value: Option<Vec<String>> = store.get("users").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_set_get_roundtrip() {
        let (_dir, store) = store();
        store.set("cart", &vec!["a".to_owned(), "b".to_owned()]).unwrap();

        let value: Option<Vec<String>> = store.get("cart").unwrap();
        assert_eq!(value.unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_set_overwrites_whole_value() {
        let (_dir, store) = store();
        store.set("cart", &vec![1, 2, 3]).unwrap();
        store.set("cart", &vec![9]).unwrap();

        let value: Option<Vec<i32>> = store.get("cart").unwrap();
        assert_eq!(value.unwrap(), vec![9]);
    }

    #[test]
    fn test_malformed_value_is_parse_error() {
        let (dir, store) = store();
        std::fs::write(dir.path().join("users.json"), "{not json").unwrap();

        let err = store.get::<Vec<String>>("users").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, store) = store();
        store.set("currentUser", &"ann").unwrap();
        store.remove("currentUser").unwrap();
        store.remove("currentUser").unwrap();

        let value: Option<String> = store.get("currentUser").unwrap();
        assert!(value.is_none());
    }
}
