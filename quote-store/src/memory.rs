use std::collections::HashMap;
use std::sync::Mutex;

use quote_core::store::{KeyValueStore, StoreError, check_key};

/// In-memory store for tests and throwaway runs.
/// Nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        check_key(key)?;
        let map = self
            .map
            .lock()
            .map_err(|_| StoreError::Backend("store mutex poisoned".to_string()))?;
        Ok(map.get(key).cloned())
    }

    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        check_key(key)?;
        let mut map = self
            .map
            .lock()
            .map_err(|_| StoreError::Backend("store mutex poisoned".to_string()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
