//! Key-value persistence abstraction
//!
//! Mirrors the host runtime's synchronous `getStorageSync` / `setStorageSync`
//! pair. Stores serialize their whole state to one JSON string per key.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::error::{StoreError, StoreResult};

/// Synchronous key-value storage used by the stores
///
/// Implementations:
/// - [`MemoryStorage`]: process-local map (tests, ephemeral sessions)
/// - [`FileStorage`]: one JSON file per key inside a directory
pub trait StorageAdapter: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` - value exists
    /// * `Ok(None)` - nothing stored under this key
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete the value under `key`; deleting a missing key is not an error
    fn remove_item(&self, key: &str) -> StoreResult<()>;
}

// ===== MemoryStorage =====

/// In-memory storage adapter
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-filled with one entry (simulates a previous app run)
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.items.write().insert(key.into(), value.into());
        storage
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl StorageAdapter for MemoryStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.items
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.items.write().remove(key);
        Ok(())
    }
}

// ===== FileStorage =====

/// Directory-backed storage adapter
///
/// Each key maps to `<root>/<key>.json`. Keys are restricted to ASCII
/// alphanumerics, `-` and `_` so they can never escape the root directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a storage directory
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        log::debug!("File storage opened at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl StorageAdapter for FileStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        // 先写临时文件再 rename，避免中途崩溃留下半截 JSON
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
