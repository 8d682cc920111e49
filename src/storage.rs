//! Key-value snapshot persistence
//!
//! User state is saved as JSON blobs under fixed keys. A missing or unreadable blob
//! is treated as "no prior state" so a damaged file never stops the server.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Key of the completed-course snapshot
pub const COMPLETED_COURSES_KEY: &str = "completed-courses";
/// Key of the authentication/profile snapshot
pub const SESSION_KEY: &str = "session";

/// Blob storage addressed by key
pub trait KeyValueStore: Send + Sync {
    /// Read the blob stored under `key`, `None` if nothing was saved yet
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`
    fn save(&self, key: &str, blob: &str) -> Result<()>;
}

/// Directory-backed store: each key lives in `<dir>/<key>.json`
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for Storage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(content))
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let path = self.key_path(key);
        fs::write(&path, blob).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}

/// In-memory store, nothing touches the disk
#[derive(Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let blobs = self
            .blobs
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        Ok(blobs.get(key).cloned())
    }

    fn save(&self, key: &str, blob: &str) -> Result<()> {
        let mut blobs = self
            .blobs
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))?;
        blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

/// Load and decode the snapshot under `key`.
///
/// Read failures and undecodable blobs are logged and reported as absent.
pub fn load_snapshot<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let blob = match store.load(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "could not read snapshot, starting empty");
            return None;
        }
    };

    match serde_json::from_str(&blob) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "malformed snapshot ignored");
            None
        }
    }
}

/// Encode `value` and store it under `key`
pub fn save_snapshot<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let blob = serde_json::to_string_pretty(value)?;
    store.save(key, &blob)
}
