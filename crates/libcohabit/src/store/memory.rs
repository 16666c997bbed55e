use std::collections::HashMap;

use ahash::RandomState;

use crate::{error::CohabitError, store::PreferenceStore};

/// In-memory store, used in tests and as the fallback when no state file is
/// configured.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
  values: HashMap<String, serde_json::Value, RandomState>,
}

impl PreferenceStore for MemoryStore {
  fn get(&self, key: &str) -> Option<serde_json::Value> {
    self.values.get(key).cloned()
  }

  fn set(&mut self, key: &str, value: serde_json::Value) -> Result<(), CohabitError> {
    self.values.insert(key.to_string(), value);

    Ok(())
  }
}
