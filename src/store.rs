use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const KV_PATH_ENV: &str = "MCP_UTILS_KV_PATH";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub value: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct StoreError {
    pub kind: &'static str,
    pub message: String,
}

impl StoreError {
    fn io(path: &Path, err: io::Error) -> Self {
        Self {
            kind: "io",
            message: format!("{}: {err}", path.display()),
        }
    }

    fn serde(path: &Path, err: serde_json::Error) -> Self {
        Self {
            kind: "serialize",
            message: format!("{}: {err}", path.display()),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for StoreError {}

/// File-backed key-value map. Every mutation rewrites the whole file; the
/// dispatch loop is single-threaded, so there is no cross-call locking.
pub struct KvStore {
    path: PathBuf,
    entries: BTreeMap<String, Entry>,
}

impl KvStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) => {
                serde_json::from_slice(&bytes).map_err(|err| StoreError::serde(&path, err))?
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(StoreError::io(&path, err)),
        };
        Ok(Self { path, entries })
    }

    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(Self::default_path())
    }

    pub fn default_path() -> PathBuf {
        if let Some(path) = env::var_os(KV_PATH_ENV) {
            return PathBuf::from(path);
        }
        home_dir().join(".mcp-utils").join("kv.json")
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Returns true when the key was created rather than replaced.
    pub fn set(&mut self, key: &str, value: serde_json::Value) -> Result<bool, StoreError> {
        let now = Utc::now();
        let created = match self.entries.get_mut(key) {
            Some(entry) => {
                entry.value = value;
                entry.updated_at = now;
                false
            }
            None => {
                self.entries.insert(
                    key.to_string(),
                    Entry {
                        value,
                        created_at: now,
                        updated_at: now,
                    },
                );
                true
            }
        };
        self.save()?;
        Ok(created)
    }

    /// Returns true when the key existed.
    pub fn delete(&mut self, key: &str) -> Result<bool, StoreError> {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|err| StoreError::io(&self.path, err))?;
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|err| StoreError::serde(&self.path, err))?;
        fs::write(&self.path, json).map_err(|err| StoreError::io(&self.path, err))
    }
}

pub fn home_dir() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}
