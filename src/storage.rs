//! Durable local storage.
//!
//! File-per-key JSON store standing in for the browser's persistent
//! key-value storage. Values survive process restarts; a corrupt file reads
//! back as absent rather than failing the session.

use crate::config;
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Key holding the raw credential token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the serialized user profile.
pub const USER_KEY: &str = "user";
/// Key holding the serialized wishlist.
pub const WISHLIST_KEY: &str = "wishlist-storage";

pub struct DurableStore {
    dir: PathBuf,
}

impl DurableStore {
    /// Opens (creating if needed) the store rooted at `dir`, or at the
    /// platform data directory when `None`.
    pub fn open(dir: Option<PathBuf>) -> Result<Self> {
        let dir = dir.unwrap_or_else(config::default_data_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Reads and deserializes the value under `key`. Missing or corrupt
    /// values return `None`; corruption is logged and discarded.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = fs::read(self.path(key)).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "discarding corrupt stored value");
                None
            }
        }
    }

    /// Serializes `value` under `key`, replacing any previous value.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        fs::write(self.path(key), serde_json::to_vec(value)?)?;
        Ok(())
    }

    /// Deletes the value under `key`; absent keys are a no-op.
    pub fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.path(key).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = DurableStore::open(Some(dir.path().to_path_buf())).unwrap();

        store.set(TOKEN_KEY, &"abc123".to_string()).unwrap();
        assert_eq!(store.get::<String>(TOKEN_KEY).as_deref(), Some("abc123"));
        assert!(store.contains(TOKEN_KEY));

        store.remove(TOKEN_KEY).unwrap();
        assert_eq!(store.get::<String>(TOKEN_KEY), None);
        store.remove(TOKEN_KEY).unwrap();
    }

    #[test]
    fn test_corrupt_value_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = DurableStore::open(Some(dir.path().to_path_buf())).unwrap();
        std::fs::write(dir.path().join("user.json"), b"{not json").unwrap();
        assert_eq!(store.get::<serde_json::Value>(USER_KEY), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = DurableStore::open(Some(dir.path().to_path_buf())).unwrap();
            store.set(USER_KEY, &serde_json::json!({"id": "u1"})).unwrap();
        }
        let store = DurableStore::open(Some(dir.path().to_path_buf())).unwrap();
        let user: serde_json::Value = store.get(USER_KEY).unwrap();
        assert_eq!(user["id"], "u1");
    }
}
