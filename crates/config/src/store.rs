//! Persistent key-value store.
//!
//! The host owns durability; the core only reads and writes whole blobs by
//! key. `JsonFileStore` keeps every key in one JSON object on disk
//! (~/.config/quire/state.json, 0600 on Unix since it holds identities).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::{Map, Value};

/// Error type for store operations.
#[derive(Debug)]
pub enum StoreError {
    /// Backing file could not be read or written
    Io(String),
    /// Stored data exists but is not what we expect
    Corrupt(String),
    /// Value could not be encoded
    Serialize(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(msg) => write!(f, "I/O error: {}", msg),
            StoreError::Corrupt(msg) => write!(f, "Corrupt store: {}", msg),
            StoreError::Serialize(msg) => write!(f, "Serialize error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Whole-blob key-value storage.
pub trait Store: Send + Sync {
    /// Current blob under `key`, `None` if never written.
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the blob under `key`.
    fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// Store kept entirely in memory. Lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.lock().insert(key.to_string(), value);
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// Every `set` rewrites the whole file through a temp file + rename, so a
/// crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write of the file within this process.
    io: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), io: Mutex::new(()) }
    }

    /// Default location: ~/.config/quire/state.json
    pub fn default_path() -> PathBuf {
        crate::config_dir().join("state.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(StoreError::Io(format!("{}: {}", self.path.display(), e))),
        };
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StoreError::Corrupt(format!(
                "{}: top level is not an object",
                self.path.display()
            ))),
            Err(e) => Err(StoreError::Corrupt(format!("{}: {}", self.path.display(), e))),
        }
    }

    fn write_all(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(format!("Failed to create store directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(map)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &contents)
            .map_err(|e| StoreError::Io(format!("Failed to write {}: {}", tmp.display(), e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&tmp, permissions)
                .map_err(|e| StoreError::Io(format!("Failed to set file permissions: {}", e)))?;
        }

        fs::rename(&tmp, &self.path)
            .map_err(|e| StoreError::Io(format!("Failed to replace {}: {}", self.path.display(), e)))
    }
}

impl Store for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let _io = self.io.lock();
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let _io = self.io.lock();
        let mut map = self.read_all()?;
        map.insert(key.to_string(), value);
        self.write_all(&map)?;
        log::trace!("Store key '{}' written to {}", key, self.path.display());
        Ok(())
    }
}
