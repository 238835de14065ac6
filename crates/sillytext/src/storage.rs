use std::fs;
use std::path::{Path, PathBuf};

use crate::prelude::*;
use sillytext_core::error::StoreError;
use sillytext_core::patterns::KeyValueStore;

/// Key-value store keeping one `<key>.json` file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    /// Store rooted at `override_dir`, or `<data dir>/sillytext` otherwise.
    pub fn open(override_dir: Option<&Path>) -> Result<Self> {
        let dir = match override_dir {
            Some(dir) => dir.to_path_buf(),
            None => dirs_next::data_dir()
                .ok_or_else(|| eyre!("Unable to determine data directory"))?
                .join("sillytext"),
        };
        log::debug!("Using data directory {}", dir.display());
        Ok(FileStore::new(dir))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key).ok()?;
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Failed to read {}: {e}", path.display());
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let write_error = |source| StoreError::Write {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(write_error)?;
        fs::write(&path, value).map_err(write_error)
    }
}
