//! Flat key-value settings persistence.
//!
//! Keys are plain field names shared by [`Options`] and [`Parameters`];
//! values are JSON scalars. There is no schema version and no migration.
//! [`FileStore`] keeps the whole map in memory and rewrites the file on
//! [`SettingsStore::sync`].
pub mod options;
pub mod parameters;

pub use options::Options;
pub use parameters::{ParameterField, Parameters};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{AppError, AppResult};

pub trait SettingsStore {
    fn contains(&self, key: &str) -> bool;
    fn value(&self, key: &str) -> Option<&Value>;
    fn set_value(&mut self, key: &str, value: Value);
    /// Flush pending writes to the backing storage.
    fn sync(&mut self) -> AppResult<()>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn set_value(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    fn sync(&mut self) -> AppResult<()> {
        Ok(())
    }
}

/// JSON-file backed store. A missing file behaves as an empty store.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(data) if data.trim().is_empty() => BTreeMap::new(),
            Ok(data) => match serde_json::from_str::<Value>(&data)? {
                Value::Object(map) => map.into_iter().collect(),
                _ => {
                    return Err(AppError::Settings(format!(
                        "{} does not hold a JSON object",
                        path.display()
                    )))
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!("Loaded {} setting(s) from {}", values.len(), path.display());
        Ok(FileStore { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileStore {
    fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn set_value(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    fn sync(&mut self) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, body)?;
        Ok(())
    }
}
