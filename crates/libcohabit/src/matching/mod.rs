pub(crate) mod facets;
pub(crate) mod filters;
pub(crate) mod predicates;
pub(crate) mod sort;


use std::collections::HashMap;

use ahash::RandomState;
use serde::Deserialize;

use crate::{
  geo::{BRUSSELS, Coordinates},
  matching::{
    facets::{ListingFacets, ProfileFacets, listing_facets, profile_facets},
    filters::{ProfileTagFilters, ProfileUiFilters, RefinementFilters, RefinementWeights, TagFilters, UiFilters},
    predicates::{matches_profile_search, passes_profile_filters, passes_profile_tag_filters, passes_refinement_filters, passes_tag_filters, passes_ui_filters, quality_gate},
    sort::{SortContext, SortKey, sort_entries},
  },
  model::{ListingEntry, ProfileCard, StatusView},
  scoring::adjusted_scores,
};

/// Everything one matching pass depends on. Built fresh per call; the
/// pipeline holds no state of its own.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct MatchState {
  pub view: StatusView,
  pub sort: SortKey,
  pub ui: UiFilters,
  pub tags: TagFilters,
  pub refinement: Option<RefinementFilters>,
  pub weights: RefinementWeights,
  #[serde(skip)]
  pub personal: HashMap<String, f64, RandomState>,
  #[serde(skip)]
  pub reference: Coordinates,
}

impl Default for MatchState {
  fn default() -> Self {
    MatchState {
      view: StatusView::default(),
      sort: SortKey::default(),
      ui: UiFilters::default(),
      tags: TagFilters::default(),
      refinement: None,
      weights: RefinementWeights::default(),
      personal: HashMap::default(),
      reference: BRUSSELS,
    }
  }
}

#[derive(Clone, Debug, Default)]
pub struct MatchOutcome {
  pub entries: Vec<ListingEntry>,
  pub facets: ListingFacets,
  pub adjusted: HashMap<String, f64, RandomState>,
  pub gated_total: usize,
}

/// Run the full pipeline: lifecycle view, quality gate, refinement filters
/// when a questionnaire profile is active, manual UI filters, tag filters,
/// sort. Full recompute over the whole collection on every call.
pub fn match_and_sort(entries: &[ListingEntry], state: &MatchState) -> MatchOutcome {
  let gated = entries.iter().filter(|entry| state.view.allows(entry.status)).filter(|entry| quality_gate(entry)).cloned().collect::<Vec<_>>();

  // Facet counts reflect available options, so they are taken before any
  // user-controlled filter.
  let facets = listing_facets(&gated);
  let gated_total = gated.len();

  let adjusted = match &state.refinement {
    Some(_) => adjusted_scores(&gated, &state.weights),
    None => HashMap::default(),
  };

  let mut kept = gated
    .into_iter()
    .filter(|entry| match &state.refinement {
      Some(refinement) => passes_refinement_filters(entry, refinement, adjusted.get(&entry.listing.id).copied()),
      None => true,
    })
    .filter(|entry| passes_ui_filters(entry, &state.ui, adjusted.get(&entry.listing.id).copied()))
    .filter(|entry| passes_tag_filters(entry, &state.tags))
    .collect::<Vec<_>>();

  let ctx = SortContext {
    reference: state.reference,
    personal: state.personal.clone(),
    adjusted: adjusted.clone(),
  };

  sort_entries(&mut kept, state.sort, &ctx);

  tracing::debug!(total = kept.len(), gated = gated_total, "matched listings");

  MatchOutcome {
    entries: kept,
    facets,
    adjusted,
    gated_total,
  }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProfileState {
  pub filters: ProfileUiFilters,
  pub tags: ProfileTagFilters,
  pub search: String,
}

#[derive(Clone, Debug, Default)]
pub struct ProfileOutcome {
  pub profiles: Vec<ProfileCard>,
  pub facets: ProfileFacets,
}

/// Person-side pipeline: no lifecycle or quality gate, the whole collection
/// is eligible.
pub fn match_profiles(profiles: &[ProfileCard], state: &ProfileState) -> ProfileOutcome {
  let facets = profile_facets(profiles);

  let kept = profiles
    .iter()
    .filter(|profile| matches_profile_search(profile, &state.search))
    .filter(|profile| passes_profile_filters(profile, &state.filters))
    .filter(|profile| passes_profile_tag_filters(profile, &state.tags))
    .cloned()
    .collect::<Vec<_>>();

  tracing::debug!(total = kept.len(), "matched profiles");

  ProfileOutcome { profiles: kept, facets }
}
