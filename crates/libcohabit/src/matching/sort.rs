use std::{cmp::Ordering, collections::HashMap};

use ahash::RandomState;
use any_ascii::any_ascii;
use serde::{Deserialize, Serialize};

use crate::{
  geo::{BRUSSELS, Coordinates, haversine, listing_coordinates},
  model::ListingEntry,
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
  #[default]
  Score,
  Personal,
  Price,
  Surface,
  Distance,
  Date,
  Name,
  Location,
}

/// External inputs the comparators need: the distance reference point, the
/// personalization scores for the active criteria, and the refined scores
/// when a questionnaire profile is active.
#[derive(Clone, Debug)]
pub struct SortContext {
  pub reference: Coordinates,
  pub personal: HashMap<String, f64, RandomState>,
  pub adjusted: HashMap<String, f64, RandomState>,
}

impl Default for SortContext {
  fn default() -> Self {
    SortContext {
      reference: BRUSSELS,
      personal: HashMap::default(),
      adjusted: HashMap::default(),
    }
  }
}

impl SortContext {
  fn headline_score(&self, entry: &ListingEntry) -> Option<f64> {
    self.adjusted.get(&entry.listing.id).copied().or_else(|| entry.score())
  }
}

fn date_key(entry: &ListingEntry) -> &str {
  entry.listing.date_published.as_deref().unwrap_or(&entry.listing.date_scraped)
}

/// Stable in-place sort with the per-key null policy: missing scores sort
/// last on descending keys, missing prices and coordinates sort last on
/// ascending keys, missing surfaces count as zero.
pub fn sort_entries(entries: &mut [ListingEntry], key: SortKey, ctx: &SortContext) {
  match key {
    SortKey::Score => entries.sort_by(|a, b| {
      let a = ctx.headline_score(a).unwrap_or(-1.0);
      let b = ctx.headline_score(b).unwrap_or(-1.0);

      b.total_cmp(&a)
    }),

    SortKey::Personal => entries.sort_by(|a, b| {
      let a = ctx.personal.get(&a.listing.id).copied().or_else(|| ctx.headline_score(a)).unwrap_or(-1.0);
      let b = ctx.personal.get(&b.listing.id).copied().or_else(|| ctx.headline_score(b)).unwrap_or(-1.0);

      b.total_cmp(&a)
    }),

    SortKey::Price => entries.sort_by(|a, b| {
      let a = a.listing.price_amount.unwrap_or(f64::INFINITY);
      let b = b.listing.price_amount.unwrap_or(f64::INFINITY);

      a.total_cmp(&b)
    }),

    SortKey::Surface => entries.sort_by(|a, b| {
      let a = a.tags.as_ref().and_then(|t| t.surface_m2).unwrap_or(0.0);
      let b = b.tags.as_ref().and_then(|t| t.surface_m2).unwrap_or(0.0);

      b.total_cmp(&a)
    }),

    SortKey::Distance => entries.sort_by(|a, b| {
      let a = listing_coordinates(&a.listing).map(|point| haversine(ctx.reference, point)).unwrap_or(f64::INFINITY);
      let b = listing_coordinates(&b.listing).map(|point| haversine(ctx.reference, point)).unwrap_or(f64::INFINITY);

      a.total_cmp(&b)
    }),

    // ISO-8601 strings compare correctly lexicographically.
    SortKey::Date => entries.sort_by(|a, b| date_key(b).cmp(date_key(a))),

    SortKey::Name => entries.sort_by(|a, b| collation_key(&a.listing.title).cmp(&collation_key(&b.listing.title))),

    SortKey::Location => entries.sort_by(|a, b| compare_locations(a, b)),
  }
}

// Accent-folded so French titles collate by letter, not by code point.
fn collation_key(text: &str) -> String {
  any_ascii(text).to_lowercase()
}

fn compare_locations(a: &ListingEntry, b: &ListingEntry) -> Ordering {
  let a = collation_key(a.listing.location.as_deref().or(a.listing.province.as_deref()).unwrap_or_default());
  let b = collation_key(b.listing.location.as_deref().or(b.listing.province.as_deref()).unwrap_or_default());

  a.cmp(&b)
}
