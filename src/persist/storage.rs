// ==========================================
// stockbook - storage backends
// ==========================================
// A backend is a flat string key/value store with an optional
// byte quota, which is how the quota-recovery path gets exercised
// in tests without filling a disk. FileStorage keeps one file per
// key under a data directory; MemoryStorage backs tests.
// ==========================================

use crate::persist::error::{StorageError, StorageResult};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

pub trait StorageBackend {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&mut self, key: &str);
    fn keys(&self) -> Vec<String>;

    fn len_bytes(&self) -> usize {
        self.keys()
            .iter()
            .filter_map(|k| self.get(k))
            .map(|v| v.len())
            .sum()
    }
}

// ==========================================
// MemoryStorage
// ==========================================

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that rejects writes once total stored bytes would
    /// exceed the quota.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn would_exceed(&self, key: &str, value: &str) -> bool {
        let Some(quota) = self.quota_bytes else {
            return false;
        };
        let current: usize = self
            .entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len())
            .sum();
        current + value.len() > quota
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.would_exceed(key, value) {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
                attempted: value.len(),
            });
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

// ==========================================
// FileStorage
// ==========================================
// One .json file per key inside `dir`. Keys only ever come from
// the fixed key set, so no filename escaping is needed.

#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
    quota_bytes: Option<usize>,
}

impl FileStorage {
    pub fn open(dir: PathBuf) -> StorageResult<Self> {
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "file storage opened");
        Ok(Self {
            dir,
            quota_bytes: None,
        })
    }

    pub fn open_with_quota(dir: PathBuf, quota_bytes: usize) -> StorageResult<Self> {
        let mut storage = Self::open(dir)?;
        storage.quota_bytes = Some(quota_bytes);
        Ok(storage)
    }

    /// Platform data directory, `<data_dir>/stockbook`.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("stockbook"))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn stored_bytes_excluding(&self, key: &str) -> usize {
        self.keys()
            .iter()
            .filter(|k| k.as_str() != key)
            .filter_map(|k| fs::metadata(self.path_for(k)).ok())
            .map(|m| m.len() as usize)
            .sum()
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(quota) = self.quota_bytes {
            if self.stored_bytes_excluding(key) + value.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    attempted: value.len(),
                });
            }
        }
        // Write through a temp file so a crash mid-write cannot
        // leave a truncated collection behind.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        let _ = fs::remove_file(self.path_for(key));
    }

    fn keys(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        entries
            .flatten()
            .filter_map(|e| {
                let name = e.file_name().to_string_lossy().to_string();
                name.strip_suffix(".json").map(|s| s.to_string())
            })
            .collect()
    }
}
