//! Durable key-value storage scoped to one viewer profile.
//!
//! The gallery keeps three independent records (approved photos, pending
//! photos, liked ids), each a JSON document stored under its own key. The
//! [`KeyValueStore`] trait is the seam between the gallery state and
//! wherever those documents actually live:
//!
//! | Store | Backing | Used by |
//! |---|---|---|
//! | [`FileStore`] | one `<key>.json` file per key in a directory | the CLI |
//! | [`MemoryStore`] | a `HashMap` | tests, embedding |
//!
//! Stores deal in raw strings. Parsing and schema validation happen one
//! level up in [`repository`](crate::repository) and [`likes`](crate::likes),
//! so a store never fails because a document is malformed; only because the
//! medium itself failed.
//!
//! ## Atomic writes
//!
//! [`FileStore::set`] writes to a sibling temp file and renames it into
//! place. A crash mid-write leaves either the old document or the new one,
//! never a truncated file.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid store key: {0:?}")]
    InvalidKey(String),
}

/// Minimal key-value storage contract, modelled on browser local storage.
pub trait KeyValueStore {
    /// Read the document under `key`. `Ok(None)` means the key was never set.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the document under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the document under `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Directory-backed store: each key is a `<key>.json` file.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the file path for a key.
    ///
    /// Keys are plain identifiers; anything that could escape the store
    /// directory is rejected.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        log::debug!("wrote {} ({} bytes)", path.display(), value.len());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `(key, document)` pairs.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}
