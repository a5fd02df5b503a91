//! Key-value storage backends for persisted slices.
//!
//! Every slice is stored as one JSON string under a fixed key:
//!
//! | Key                 | Value                         |
//! |---------------------|-------------------------------|
//! | `site_settings`     | `SiteSettings` object         |
//! | `site_destinations` | array of `Destination`        |
//! | `site_blogs`        | array of `BlogPost`           |
//! | `is_admin`          | `"true"` or anything else     |
//!
//! `MemoryStorage` backs tests and ephemeral sessions, `FileStorage` keeps
//! one file per key inside a directory.

use super::error::StorageError;
use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

pub const SETTINGS_KEY: &str = "site_settings";
pub const DESTINATIONS_KEY: &str = "site_destinations";
pub const BLOGS_KEY: &str = "site_blogs";
pub const ADMIN_KEY: &str = "is_admin";

/// All keys owned by the store.
pub const KEYS: [&str; 4] = [SETTINGS_KEY, DESTINATIONS_KEY, BLOGS_KEY, ADMIN_KEY];

/// String key-value storage.
pub trait Storage {
    /// Read a value. `Ok(None)` when the key was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

// ============================================================================
// MemoryStorage
// ============================================================================

/// In-memory storage.
///
/// Records every written key in order, so callers can check which slices
/// a mutation touched.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
    writes: Vec<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a storage pre-filled with raw values.
    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            items: items
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            writes: Vec::new(),
        }
    }

    /// Keys written so far, in write order (removals excluded).
    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_owned(), value.to_owned());
        self.writes.push(key.to_owned());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

// ============================================================================
// FileStorage
// ============================================================================

/// Directory-backed storage, one `<key>.json` file per key.
///
/// Writes land in a temporary sibling first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io(path, err)),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|err| StorageError::Io(self.dir.clone(), err))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|err| StorageError::Io(tmp.clone(), err))?;
        fs::rename(&tmp, &path).map_err(|err| StorageError::Io(path, err))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io(path, err)),
        }
    }
}
