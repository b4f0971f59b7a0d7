//! Durable key/value storage for user choices.
//!
//! Works like a browser's local storage: string keys, string values,
//! best effort. Callers decide what to do with failures; the filter state
//! ignores them.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::{CronogramaError, CronogramaResult};

const STORAGE_FILE: &str = "storage.json";

pub trait Storage {
    fn get(&self, key: &str) -> CronogramaResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> CronogramaResult<()>;
}

/// Storage backed by a single JSON object file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage kept in `<dir>/storage.json`. The directory is created on first write.
    pub fn in_dir(dir: &Path) -> Self {
        FileStorage {
            path: dir.join(STORAGE_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> CronogramaResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| {
            CronogramaError::Storage(format!("Corrupt storage file {}: {}", self.path.display(), e))
        })
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> CronogramaResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> CronogramaResult<()> {
        // A corrupt file is replaced rather than blocking every future write.
        let mut values = self.read_all().unwrap_or_default();
        values.insert(key.to_string(), value.to_string());

        let dir = self
            .path
            .parent()
            .ok_or_else(|| CronogramaError::Storage("Storage path has no parent directory".into()))?;
        std::fs::create_dir_all(dir)?;

        let temp = self.path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(&values)?;
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

/// In-process storage. Lives as long as the value does.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    writes: usize,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Make every subsequent write fail, like a full quota.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> CronogramaResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> CronogramaResult<()> {
        if self.fail_writes {
            return Err(CronogramaError::Storage("quota exceeded".into()));
        }
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}
