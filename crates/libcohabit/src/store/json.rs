use std::{
  collections::HashMap,
  fs,
  path::{Path, PathBuf},
};

use ahash::RandomState;
use anyhow::Context;

use crate::{error::CohabitError, store::PreferenceStore};

/// Single-file JSON store. The whole file is read once at startup and
/// rewritten on every set, which is plenty for a single-user state file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
  path: PathBuf,
  values: HashMap<String, serde_json::Value, RandomState>,
}

impl JsonFileStore {
  /// A missing or unreadable state file starts empty rather than failing:
  /// losing saved statuses beats refusing to start.
  pub fn open<P: AsRef<Path>>(path: P) -> JsonFileStore {
    let path = path.as_ref().to_path_buf();

    let values = match fs::read(&path) {
      Err(_) => HashMap::default(),

      Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), %err, "unreadable state file, starting empty");

        HashMap::default()
      }),
    };

    JsonFileStore { path, values }
  }

  fn flush(&self) -> Result<(), CohabitError> {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("could not create {}", parent.display()))?;
    }

    let bytes = serde_json::to_vec_pretty(&self.values).map_err(anyhow::Error::from)?;

    fs::write(&self.path, bytes).with_context(|| format!("could not write {}", self.path.display()))?;

    Ok(())
  }
}

impl PreferenceStore for JsonFileStore {
  fn get(&self, key: &str) -> Option<serde_json::Value> {
    self.values.get(key).cloned()
  }

  fn set(&mut self, key: &str, value: serde_json::Value) -> Result<(), CohabitError> {
    self.values.insert(key.to_string(), value);
    self.flush()
  }
}
