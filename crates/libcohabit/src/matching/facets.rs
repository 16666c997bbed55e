use std::collections::HashMap;

use ahash::RandomState;
use itertools::Itertools;
use serde::Serialize;

use crate::model::{ListingEntry, ProfileCard};

/// One distinct value of a filterable field with its occurrence count.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FacetCount {
  pub value: String,
  pub count: usize,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct BoolFacet {
  pub yes: usize,
  pub no: usize,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ListingFacets {
  pub provinces: Vec<FacetCount>,
  pub listing_types: Vec<FacetCount>,
  pub project_types: Vec<FacetCount>,
  pub environments: Vec<FacetCount>,
  pub shared_spaces: Vec<FacetCount>,
  pub values: Vec<FacetCount>,
  pub shared_meals: Vec<FacetCount>,
  pub unit_types: Vec<FacetCount>,
  pub age_range: Vec<FacetCount>,
  pub family_types: Vec<FacetCount>,
  pub governance: Vec<FacetCount>,
  pub pet_details: Vec<FacetCount>,
  pub availability_status: Vec<FacetCount>,
  pub pets_allowed: BoolFacet,
  pub has_children: BoolFacet,
  pub has_charter: BoolFacet,
  pub furnished: BoolFacet,
  pub accessible_pmr: BoolFacet,
  pub near_nature: BoolFacet,
  pub near_transport: BoolFacet,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ProfileFacets {
  pub regions: Vec<FacetCount>,
  pub genders: Vec<FacetCount>,
  pub community_size: Vec<FacetCount>,
  pub core_values: Vec<FacetCount>,
}

#[derive(Default)]
struct Counter {
  counts: HashMap<String, usize, RandomState>,
}

impl Counter {
  fn bump(&mut self, value: &str) {
    *self.counts.entry(value.to_string()).or_default() += 1;
  }

  fn bump_opt(&mut self, value: Option<&str>) {
    if let Some(value) = value {
      self.bump(value);
    }
  }

  fn bump_all(&mut self, values: &[String]) {
    for value in values {
      self.bump(value);
    }
  }

  // Count descending; ties broken by value so the output is reproducible.
  fn finish(self) -> Vec<FacetCount> {
    self
      .counts
      .into_iter()
      .sorted_by(|(lvalue, lcount), (rvalue, rcount)| rcount.cmp(lcount).then_with(|| lvalue.cmp(rvalue)))
      .map(|(value, count)| FacetCount { value, count })
      .collect()
  }
}

impl BoolFacet {
  fn bump(&mut self, value: Option<bool>) {
    match value {
      Some(true) => self.yes += 1,
      Some(false) => self.no += 1,
      None => {}
    }
  }
}

/// Aggregate the filterable fields of the quality-gated collection. Counts
/// reflect available options, so this is recomputed when the base collection
/// changes, not when filters change.
pub fn listing_facets(entries: &[ListingEntry]) -> ListingFacets {
  let mut provinces = Counter::default();
  let mut listing_types = Counter::default();
  let mut project_types = Counter::default();
  let mut environments = Counter::default();
  let mut shared_spaces = Counter::default();
  let mut values = Counter::default();
  let mut shared_meals = Counter::default();
  let mut unit_types = Counter::default();
  let mut age_range = Counter::default();
  let mut family_types = Counter::default();
  let mut governance = Counter::default();
  let mut pet_details = Counter::default();
  let mut availability = Counter::default();
  let mut facets = ListingFacets::default();

  for entry in entries {
    provinces.bump_opt(entry.listing.province.as_deref());
    listing_types.bump_opt(entry.listing.listing_type.as_deref());
    availability.bump_opt(entry.evaluation.as_ref().and_then(|e| e.availability_status).map(|status| status.as_str()));

    if let Some(tags) = &entry.tags {
      project_types.bump_all(&tags.project_types);
      environments.bump_opt(tags.environment.as_deref());
      shared_spaces.bump_all(&tags.shared_spaces);
      values.bump_all(&tags.values);
      shared_meals.bump_opt(tags.shared_meals.as_deref());
      unit_types.bump_opt(tags.unit_type.as_deref());
      age_range.bump_all(&tags.age_range);
      family_types.bump_all(&tags.family_types);
      governance.bump_opt(tags.governance.as_deref());
      pet_details.bump_all(&tags.pet_details);

      facets.pets_allowed.bump(tags.pets_allowed);
      facets.has_children.bump(tags.has_children);
      facets.has_charter.bump(tags.has_charter);
      facets.furnished.bump(tags.furnished);
      facets.accessible_pmr.bump(tags.accessible_pmr);
      facets.near_nature.bump(tags.near_nature);
      facets.near_transport.bump(tags.near_transport);
    }
  }

  facets.provinces = provinces.finish();
  facets.listing_types = listing_types.finish();
  facets.project_types = project_types.finish();
  facets.environments = environments.finish();
  facets.shared_spaces = shared_spaces.finish();
  facets.values = values.finish();
  facets.shared_meals = shared_meals.finish();
  facets.unit_types = unit_types.finish();
  facets.age_range = age_range.finish();
  facets.family_types = family_types.finish();
  facets.governance = governance.finish();
  facets.pet_details = pet_details.finish();
  facets.availability_status = availability.finish();

  facets
}

pub fn profile_facets(profiles: &[ProfileCard]) -> ProfileFacets {
  let mut regions = Counter::default();
  let mut genders = Counter::default();
  let mut community_size = Counter::default();
  let mut core_values = Counter::default();

  for profile in profiles {
    regions.bump_all(&profile.preferred_regions);
    genders.bump_opt(profile.gender.as_deref());
    community_size.bump_opt(profile.community_size.as_deref());
    core_values.bump_all(&profile.core_values);
  }

  ProfileFacets {
    regions: regions.finish(),
    genders: genders.finish(),
    community_size: community_size.finish(),
    core_values: core_values.finish(),
  }
}
