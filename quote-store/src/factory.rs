use std::path::PathBuf;

use anyhow::Result;
use quote_core::store::KeyValueStore;

use crate::file::JsonFileStore;
use crate::memory::MemoryStore;

/// Backend-agnostic store configuration.
///
/// | backend  | meaning of `data_dir`                       |
/// |----------|---------------------------------------------|
/// | `file`   | directory holding one `<key>.json` per key  |
/// | `memory` | unused; nothing is persisted                |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Lowercase backend identifier, `"file"` or `"memory"`.
    pub backend: String,
    pub data_dir: PathBuf,
}

/// Opens the backend named by `config`.
///
/// # Errors
///
/// Fails when the backend name is unknown or the file store cannot create
/// its data directory.
pub fn open_store(config: &StoreConfig) -> Result<Box<dyn KeyValueStore>> {
    match config.backend.as_str() {
        "file" => Ok(Box::new(JsonFileStore::open(&config.data_dir)?)),
        "memory" => Ok(Box::new(MemoryStore::new())),
        other => anyhow::bail!("unknown store backend '{other}'; available: file, memory"),
    }
}
