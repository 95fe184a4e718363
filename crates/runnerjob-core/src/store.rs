//! Job persistence stores.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::error::StoreError;

/// Key-value store of JSON objects, addressed by directory and file name.
pub trait JobStore: Send + Sync {
    /// Delete `name` under `path`.
    fn remove(&self, path: &Path, name: &str) -> Result<(), StoreError>;

    /// Write `value` as `name` under `path`, replacing any existing object.
    fn save_object(&self, path: &Path, name: &str, value: &Value) -> Result<(), StoreError>;

    /// Read `name` under `path`.
    fn load_object(&self, path: &Path, name: &str) -> Result<Value, StoreError>;

    /// Names of the `.json` objects under `path`, sorted.
    fn list(&self, path: &Path) -> Result<Vec<String>, StoreError>;
}

/// In-memory job store for testing and embedding.
pub struct MemoryJobStore {
    objects: RwLock<HashMap<PathBuf, Value>>,
}

impl MemoryJobStore {
    /// Create a new memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryJobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl JobStore for MemoryJobStore {
    fn remove(&self, path: &Path, name: &str) -> Result<(), StoreError> {
        match self.objects.write().remove(&path.join(name)) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(name.to_string())),
        }
    }

    fn save_object(&self, path: &Path, name: &str, value: &Value) -> Result<(), StoreError> {
        self.objects.write().insert(path.join(name), value.clone());
        Ok(())
    }

    fn load_object(&self, path: &Path, name: &str) -> Result<Value, StoreError> {
        self.objects
            .read()
            .get(&path.join(name))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn list(&self, path: &Path) -> Result<Vec<String>, StoreError> {
        let objects = self.objects.read();
        let mut names: Vec<String> = objects
            .keys()
            .filter(|key| key.parent() == Some(path))
            .filter_map(|key| key.file_name().and_then(|n| n.to_str()))
            .filter(|name| name.ends_with(".json"))
            .map(str::to_string)
            .collect();
        names.sort();
        Ok(names)
    }
}

/// File system job store.
///
/// Each job is one pretty-printed JSON file:
/// ```text
/// {path}/
/// ├── {id}.json
/// ├── {id}.json
/// └── ...
/// ```
///
/// Writes go to a hidden temporary file first and are renamed into place.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileJobStore;

impl FileJobStore {
    /// Create a new file store.
    pub fn new() -> Self {
        Self
    }

    fn temp_path(path: &Path, name: &str) -> PathBuf {
        path.join(format!(".{}.tmp", name))
    }
}

impl JobStore for FileJobStore {
    fn remove(&self, path: &Path, name: &str) -> Result<(), StoreError> {
        let file = path.join(name);
        fs::remove_file(&file).map_err(|e| StoreError::from_io(e, name))?;
        debug!("Removed job file {:?}", file);
        Ok(())
    }

    fn save_object(&self, path: &Path, name: &str, value: &Value) -> Result<(), StoreError> {
        fs::create_dir_all(path).map_err(|e| StoreError::from_io(e, name))?;

        let content = serde_json::to_string_pretty(value).map_err(|e| StoreError::InvalidData {
            name: name.to_string(),
            message: e.to_string(),
        })?;

        let file = path.join(name);
        let temp = Self::temp_path(path, name);
        fs::write(&temp, content).map_err(|e| StoreError::from_io(e, name))?;
        if let Err(e) = fs::rename(&temp, &file) {
            let _ = fs::remove_file(&temp);
            return Err(StoreError::from_io(e, name));
        }

        debug!("Saved job file {:?}", file);
        Ok(())
    }

    fn load_object(&self, path: &Path, name: &str) -> Result<Value, StoreError> {
        let content =
            fs::read_to_string(path.join(name)).map_err(|e| StoreError::from_io(e, name))?;

        serde_json::from_str(&content).map_err(|e| StoreError::InvalidData {
            name: name.to_string(),
            message: e.to_string(),
        })
    }

    fn list(&self, path: &Path) -> Result<Vec<String>, StoreError> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        let dir_name = path.display().to_string();
        for entry in fs::read_dir(path).map_err(|e| StoreError::from_io(e, &dir_name))? {
            let entry_path = entry.map_err(|e| StoreError::from_io(e, &dir_name))?.path();
            if !entry_path.is_file() || entry_path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            if let Some(name) = entry_path.file_name().and_then(|n| n.to_str()) {
                if !name.starts_with('.') {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
