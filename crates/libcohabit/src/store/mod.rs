mod json;
mod memory;

use std::collections::HashMap;

use ahash::RandomState;
use jiff::Timestamp;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
  error::CohabitError,
  model::{ListingEntry, ListingStatus, QuestionnaireAnswers},
};

pub use json::JsonFileStore;
pub use memory::MemoryStore;

/// Well-known keys in the preference store.
pub mod keys {
  pub const LISTING_STATES: &str = "listing_states";
  pub const LISTING_NOTES: &str = "listing_notes";
  pub const LAST_VISIT: &str = "last_visit";
  pub const QUESTIONNAIRE_ANSWERS: &str = "questionnaire_answers";
  pub const REFINEMENT_STATE: &str = "refinement_state";
  pub const PERSONALIZATION: &str = "personalization";
}

/// A flat key-value store for user preferences. Reads never fail: anything
/// missing or unparseable falls back to the default so one corrupt record
/// cannot take the whole profile down.
pub trait PreferenceStore: Send + Sync + 'static {
  fn get(&self, key: &str) -> Option<serde_json::Value>;
  fn set(&mut self, key: &str, value: serde_json::Value) -> Result<(), CohabitError>;

  fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
    match self.get(key) {
      None => T::default(),

      Some(value) => serde_json::from_value(value).unwrap_or_else(|err| {
        tracing::debug!(key, %err, "unreadable preference value, using defaults");

        T::default()
      }),
    }
  }

  fn set_serialized<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), CohabitError> {
    self.set(key, serde_json::to_value(value).map_err(anyhow::Error::from)?)
  }
}

/// The per-user working state layered on top of the immutable listing data.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct UserState {
  pub statuses: HashMap<String, ListingStatus, RandomState>,
  pub notes: HashMap<String, String, RandomState>,
  pub last_visit: Option<String>,
}

impl UserState {
  pub fn load<S: PreferenceStore>(store: &S) -> UserState {
    UserState {
      statuses: store.get_or_default(keys::LISTING_STATES),
      notes: store.get_or_default(keys::LISTING_NOTES),
      last_visit: store.get_or_default(keys::LAST_VISIT),
    }
  }

  pub fn set_status<S: PreferenceStore>(&mut self, store: &mut S, listing_id: &str, status: ListingStatus) -> Result<(), CohabitError> {
    self.statuses.insert(listing_id.to_string(), status);
    store.set_serialized(keys::LISTING_STATES, &self.statuses)
  }

  pub fn set_notes<S: PreferenceStore>(&mut self, store: &mut S, listing_id: &str, notes: &str) -> Result<(), CohabitError> {
    if notes.is_empty() {
      self.notes.remove(listing_id);
    } else {
      self.notes.insert(listing_id.to_string(), notes.to_string());
    }

    store.set_serialized(keys::LISTING_NOTES, &self.notes)
  }

  /// Record the current time as the last visit, returning the previous one.
  pub fn touch_visit<S: PreferenceStore>(&mut self, store: &mut S) -> Result<Option<String>, CohabitError> {
    let previous = self.last_visit.replace(Timestamp::now().to_string());

    store.set_serialized(keys::LAST_VISIT, &self.last_visit)?;

    Ok(previous)
  }

  /// Overlay statuses and notes onto freshly loaded entries.
  pub fn apply_to(&self, entries: &mut [ListingEntry]) {
    for entry in entries {
      if let Some(status) = self.statuses.get(&entry.listing.id) {
        entry.status = *status;
      }

      if let Some(notes) = self.notes.get(&entry.listing.id) {
        entry.notes = notes.clone();
      }
    }
  }

  /// Whether a listing appeared after the previous visit.
  pub fn new_since(&self, entry: &ListingEntry, previous_visit: Option<&str>) -> bool {
    match previous_visit {
      None => false,
      Some(visit) => entry.listing.date_published.as_deref().unwrap_or(&entry.listing.date_scraped) > visit,
    }
  }
}

/// Load the saved questionnaire answers, if any.
pub fn saved_answers<S: PreferenceStore>(store: &S) -> QuestionnaireAnswers {
  store.get_or_default(keys::QUESTIONNAIRE_ANSWERS)
}
