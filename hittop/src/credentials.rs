//! Bearer token lookup. The token is written by whoever signs the user in; we only ever read it.
//!
//! Default store: $XDG_CONFIG_HOME/hittop/storage.json, a flat JSON object of string keys to
//! string values. The file is re-read on every lookup so a refreshed token is picked up by the
//! next request without a restart.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use crate::profiles::config_dir;

/// Key under which the API token is stored.
pub const TOKEN_KEY: &str = "analytics_token";

pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

pub fn storage_path() -> PathBuf {
    config_dir().join("storage.json")
}

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(storage_path())
    }
}

impl TokenStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let map: HashMap<String, String> = match serde_json::from_str(&raw) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "unreadable credential store"
                );
                return None;
            }
        };
        map.get(key).filter(|v| !v.is_empty()).cloned()
    }
}

/// In-process store; used by demo mode and tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn with_token(token: &str) -> Self {
        let store = Self::default();
        store.set(TOKEN_KEY, token);
        store
    }

    pub fn set(&self, key: &str, value: &str) {
        if let Ok(mut m) = self.entries.write() {
            m.insert(key.to_string(), value.to_string());
        }
    }
}

impl TokenStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_reads_fresh_value_each_time() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("storage.json");
        let store = FileStore::new(&path);
        assert_eq!(store.get(TOKEN_KEY), None);

        fs::write(&path, r#"{"analytics_token":"first"}"#).unwrap();
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("first"));

        fs::write(&path, r#"{"analytics_token":"second","other":"x"}"#).unwrap();
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("second"));
    }

    #[test]
    fn file_store_tolerates_garbage_and_empty_values() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("storage.json");
        fs::write(&path, "not json").unwrap();
        assert_eq!(FileStore::new(&path).get(TOKEN_KEY), None);
        fs::write(&path, r#"{"analytics_token":""}"#).unwrap();
        assert_eq!(FileStore::new(&path).get(TOKEN_KEY), None);
    }

    #[test]
    fn memory_store_overwrites() {
        let store = MemoryStore::with_token("a");
        store.set(TOKEN_KEY, "b");
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("b"));
    }
}
