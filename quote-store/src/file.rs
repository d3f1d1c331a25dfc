use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quote_core::store::{KeyValueStore, StoreError, check_key};
use tracing::debug;

/// File-per-key store: each key becomes `<key>.json` inside the data
/// directory. Writes go to a sibling temp file first and are renamed into
/// place, so a crash mid-write never leaves a half-written record behind.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens the store rooted at `dir`, creating the directory when needed.
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("cannot create data directory '{}'", dir.display()))?;
        debug!("file store rooted at {}", dir.display());
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(
        &self,
        key: &str,
    ) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        check_key(key)?;
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        check_key(key)?;
        let target = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value).map_err(|e| StoreError::Backend(e.to_string()))?;
        fs::rename(&tmp, &target).map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(())
    }
}
