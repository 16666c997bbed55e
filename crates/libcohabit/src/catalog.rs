use std::{collections::HashMap, fs, path::Path};

use ahash::RandomState;

use crate::{
  error::CohabitError,
  model::{Evaluation, Listing, ListingEntry, ListingTags, ProfileCard},
};

fn read_optional<T: serde::de::DeserializeOwned>(path: &Path) -> Vec<T> {
  let Ok(bytes) = fs::read(path) else {
    return vec![];
  };

  serde_json::from_slice(&bytes).unwrap_or_else(|err| {
    tracing::warn!(path = %path.display(), %err, "unreadable snapshot file, ignoring it");

    vec![]
  })
}

/// Load the scraped snapshot from a data directory and join listings with
/// their evaluations and tags. Only the listings file is mandatory:
/// evaluations and tags trickle in from separate jobs and may lag behind.
pub fn load_snapshot<P: AsRef<Path>>(dir: P) -> Result<Vec<ListingEntry>, CohabitError> {
  let dir = dir.as_ref();

  let listings_path = dir.join("listings.json");
  let bytes = fs::read(&listings_path).map_err(|err| CohabitError::SnapshotError(format!("could not read {}: {err}", listings_path.display())))?;
  let listings: Vec<Listing> = serde_json::from_slice(&bytes).map_err(|err| CohabitError::SnapshotError(format!("invalid listings file: {err}")))?;

  let mut evaluations: HashMap<String, Evaluation, RandomState> = read_optional::<Evaluation>(&dir.join("evaluations.json"))
    .into_iter()
    .map(|evaluation| (evaluation.listing_id.clone(), evaluation))
    .collect();

  let mut tags: HashMap<String, ListingTags, RandomState> = read_optional::<ListingTags>(&dir.join("tags.json")).into_iter().map(|tags| (tags.listing_id.clone(), tags)).collect();

  let entries = listings
    .into_iter()
    .map(|listing| {
      let evaluation = evaluations.remove(&listing.id);
      let tags = tags.remove(&listing.id);

      ListingEntry {
        listing,
        evaluation,
        tags,
        ..Default::default()
      }
    })
    .collect::<Vec<_>>();

  tracing::info!(listings = entries.len(), "loaded listing snapshot");

  Ok(entries)
}

/// Load the person-side profiles; an absent file is an empty community.
pub fn load_profiles<P: AsRef<Path>>(dir: P) -> Vec<ProfileCard> {
  let profiles = read_optional::<ProfileCard>(&dir.as_ref().join("profiles.json"));

  tracing::info!(profiles = profiles.len(), "loaded profiles");

  profiles
}
