use crate::{
  matching::filters::{ProfileTagFilters, ProfileUiFilters, RefinementFilters, TagFilters, TriState, UiFilters},
  model::{AnswerValue, ListingEntry, ProfileCard},
};

/// Listings scoring below this floor are hidden from every view.
pub const MIN_QUALITY_SCORE: f64 = 15.0;

/// Categories the pipeline understands; anything else is scraper noise.
const RECOGNIZED_TYPES: &[&str] = &[
  "offre-location",
  "offre-vente",
  "demande-location",
  "demande-vente",
  "creation-groupe",
  "habitat-leger",
  "divers",
  "autre",
  "existing-project",
  "community-profile",
  "ecovillage",
  "directory",
];

fn contains_ci(haystack: &str, needle: &str) -> bool {
  haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Multi-select over a scalar field: empty list passes, otherwise the value
/// must be present and selected.
fn any_scalar(selected: &[String], value: Option<&str>) -> bool {
  if selected.is_empty() {
    return true;
  }

  value.is_some_and(|value| selected.iter().any(|s| s == value))
}

/// Multi-select over a multi-valued field: empty list passes, otherwise the
/// intersection must be non-empty.
fn any_overlap(selected: &[String], values: &[String]) -> bool {
  if selected.is_empty() {
    return true;
  }

  values.iter().any(|value| selected.iter().any(|s| s == value))
}

fn min_bound<T: PartialOrd>(bound: Option<T>, value: Option<T>) -> bool {
  match bound {
    None => true,
    Some(min) => value.is_some_and(|value| value >= min),
  }
}

fn max_bound<T: PartialOrd>(bound: Option<T>, value: Option<T>) -> bool {
  match bound {
    None => true,
    Some(max) => value.is_some_and(|value| value <= max),
  }
}

/// The always-on floor that runs before any user filter: entries with no
/// evaluation, an unrecognized category, or a score below
/// [`MIN_QUALITY_SCORE`] are dropped.
pub fn quality_gate(entry: &ListingEntry) -> bool {
  let recognized = entry.listing.listing_type.as_deref().is_some_and(|kind| RECOGNIZED_TYPES.contains(&kind));

  recognized && entry.score().is_some_and(|score| score >= MIN_QUALITY_SCORE)
}

/// Free-text search over title, description, location, province and tag
/// values.
fn matches_search(entry: &ListingEntry, query: &str) -> bool {
  let query = query.trim();

  if query.is_empty() {
    return true;
  }

  if contains_ci(&entry.listing.title, query) || contains_ci(&entry.listing.description, query) || contains_ci(&entry.listing.location_text(), query) {
    return true;
  }

  entry
    .tags
    .as_ref()
    .is_some_and(|tags| tags.project_types.iter().chain(tags.shared_spaces.iter()).chain(tags.values.iter()).any(|tag| contains_ci(tag, query)))
}

/// The manually-set filter panel. `adjusted` is the refined score when a
/// questionnaire profile is active; score bounds fall back to the raw
/// evaluation score.
pub fn passes_ui_filters(entry: &ListingEntry, filters: &UiFilters, adjusted: Option<f64>) -> bool {
  if !matches_search(entry, &filters.search_text) {
    return false;
  }

  if !any_scalar(&filters.provinces, entry.listing.province.as_deref()) {
    return false;
  }

  if !any_scalar(&filters.listing_types, entry.listing.listing_type.as_deref()) {
    return false;
  }

  if filters.price_min.is_some() || filters.price_max.is_some() {
    match entry.listing.price_amount {
      None => {
        if !filters.include_null_price {
          return false;
        }
      }

      Some(price) => {
        if filters.price_min.is_some_and(|min| price < min) || filters.price_max.is_some_and(|max| price > max) {
          return false;
        }
      }
    }
  }

  if let Some(min) = filters.score_min {
    match adjusted.or_else(|| entry.score()) {
      None => {
        if !filters.include_unscored {
          return false;
        }
      }

      Some(score) => {
        if score < min {
          return false;
        }
      }
    }
  }

  true
}

/// Hard refinement filters (questionnaire-produced or hand-edited).
///
/// Price only constrains listings that carry a numeric price; a minimum
/// score, on the other hand, always requires a score to be present.
pub fn passes_refinement_filters(entry: &ListingEntry, filters: &RefinementFilters, adjusted: Option<f64>) -> bool {
  let listing = &entry.listing;

  if !any_scalar(&filters.listing_types_include, listing.listing_type.as_deref()) {
    return false;
  }

  if !filters.listing_types_exclude.is_empty()
    && listing.listing_type.as_deref().is_some_and(|kind| filters.listing_types_exclude.iter().any(|excluded| excluded == kind))
  {
    return false;
  }

  if !filters.locations_include.is_empty() || !filters.locations_exclude.is_empty() {
    let location = listing.location_text();

    if !filters.locations_include.is_empty() && !filters.locations_include.iter().any(|included| location.contains(&included.to_lowercase())) {
      return false;
    }

    if filters.locations_exclude.iter().any(|excluded| location.contains(&excluded.to_lowercase())) {
      return false;
    }
  }

  if let (Some(max), Some(price)) = (filters.max_price, listing.price_amount)
    && price > max
  {
    return false;
  }

  if let Some(min) = filters.min_score {
    let Some(score) = adjusted.or_else(|| entry.score()) else {
      return false;
    };

    if score < min {
      return false;
    }
  }

  if !filters.keywords_include.is_empty() || !filters.keywords_exclude.is_empty() {
    let text = format!("{} {}", listing.title, listing.description).to_lowercase();

    if !filters.keywords_include.is_empty() && !filters.keywords_include.iter().any(|keyword| text.contains(&keyword.to_lowercase())) {
      return false;
    }

    if filters.keywords_exclude.iter().any(|keyword| text.contains(&keyword.to_lowercase())) {
      return false;
    }
  }

  true
}

/// Tag-based filters. A constrained tag on an entry without tags (or with
/// that tag unknown) fails, consistent with the tri-state rule.
pub fn passes_tag_filters(entry: &ListingEntry, filters: &TagFilters) -> bool {
  let tags = entry.tags.as_ref();

  let lists = [
    (&filters.project_types, tags.map(|t| t.project_types.as_slice())),
    (&filters.shared_spaces, tags.map(|t| t.shared_spaces.as_slice())),
    (&filters.values, tags.map(|t| t.values.as_slice())),
    (&filters.age_range, tags.map(|t| t.age_range.as_slice())),
    (&filters.family_types, tags.map(|t| t.family_types.as_slice())),
    (&filters.pet_details, tags.map(|t| t.pet_details.as_slice())),
  ];

  for (selected, values) in lists {
    if !any_overlap(selected, values.unwrap_or_default()) {
      return false;
    }
  }

  let scalars = [
    (&filters.environments, tags.and_then(|t| t.environment.as_deref())),
    (&filters.shared_meals, tags.and_then(|t| t.shared_meals.as_deref())),
    (&filters.unit_types, tags.and_then(|t| t.unit_type.as_deref())),
    (&filters.governance, tags.and_then(|t| t.governance.as_deref())),
  ];

  for (selected, value) in scalars {
    if !any_scalar(selected, value) {
      return false;
    }
  }

  let tristates = [
    (filters.pets_allowed, tags.and_then(|t| t.pets_allowed)),
    (filters.has_children, tags.and_then(|t| t.has_children)),
    (filters.has_charter, tags.and_then(|t| t.has_charter)),
    (filters.furnished, tags.and_then(|t| t.furnished)),
    (filters.accessible_pmr, tags.and_then(|t| t.accessible_pmr)),
    (filters.near_nature, tags.and_then(|t| t.near_nature)),
    (filters.near_transport, tags.and_then(|t| t.near_transport)),
  ];

  for (constraint, value) in tristates {
    if !constraint.matches(value) {
      return false;
    }
  }

  if !min_bound(filters.min_bedrooms, tags.and_then(|t| t.num_bedrooms)) {
    return false;
  }

  if !min_bound(filters.min_surface, tags.and_then(|t| t.surface_m2)) || !max_bound(filters.max_surface, tags.and_then(|t| t.surface_m2)) {
    return false;
  }

  if !min_bound(filters.min_group_size, tags.and_then(|t| t.group_size)) || !max_bound(filters.max_group_size, tags.and_then(|t| t.group_size)) {
    return false;
  }

  let availability = entry.evaluation.as_ref().and_then(|e| e.availability_status).map(|status| status.as_str());

  if !any_scalar(&filters.availability_status, availability) {
    return false;
  }

  true
}

/// Person-side filter panel.
pub fn passes_profile_filters(profile: &ProfileCard, filters: &ProfileUiFilters) -> bool {
  if !filters.regions.is_empty() {
    let location = profile.location.as_deref().unwrap_or_default();
    let matched = filters
      .regions
      .iter()
      .any(|region| contains_ci(location, region) || profile.preferred_regions.iter().any(|preferred| contains_ci(preferred, region)));

    if !matched {
      return false;
    }
  }

  if !any_scalar(&filters.genders, profile.gender.as_deref()) {
    return false;
  }

  if !min_bound(filters.age_min, profile.age) || !max_bound(filters.age_max, profile.age) {
    return false;
  }

  if !any_scalar(&filters.community_size, profile.community_size.as_deref()) {
    return false;
  }

  true
}

// Which questionnaire answer each profile facet reads.
const PROFILE_TAG_QUESTIONS: &[&str] = &[
  "community_values",
  "setting_type",
  "target_audience",
  "governance",
  "shared_spaces",
  "meals_together",
  "financial_model",
  "unit_types",
  "pets_allowed",
  "accessibility",
  "project_stage",
  "housing_type",
];

fn answer_matches(profile: &ProfileCard, key: &str, selected: &[String]) -> bool {
  if selected.is_empty() {
    return true;
  }

  let Some(answer) = profile.questionnaire_answers.as_ref().and_then(|answers| answers.get(key)) else {
    return false;
  };

  match answer {
    AnswerValue::Text(value) => selected.iter().any(|s| s == value),
    AnswerValue::Multi(values) => any_overlap(selected, values),
    AnswerValue::Number(_) => false,
  }
}

/// Deep filtering over the profile's raw questionnaire answers.
pub fn passes_profile_tag_filters(profile: &ProfileCard, filters: &ProfileTagFilters) -> bool {
  let facets = [
    &filters.core_values,
    &filters.setting_type,
    &filters.target_audience,
    &filters.governance,
    &filters.shared_spaces,
    &filters.meals_together,
    &filters.financial_model,
    &filters.unit_types,
    &filters.pets_allowed,
    &filters.accessibility,
    &filters.project_stage,
    &filters.housing_type,
  ];

  facets.iter().zip(PROFILE_TAG_QUESTIONS).all(|(selected, key)| answer_matches(profile, key, selected))
}

/// Free-text search over the person-side fields.
pub fn matches_profile_search(profile: &ProfileCard, query: &str) -> bool {
  let query = query.trim();

  if query.is_empty() {
    return true;
  }

  contains_ci(&profile.display_name, query)
    || profile.location.as_deref().is_some_and(|location| contains_ci(location, query))
    || profile.ai_summary.as_deref().is_some_and(|summary| contains_ci(summary, query))
    || profile.ai_tags.iter().any(|tag| contains_ci(tag, query))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::{Evaluation, Listing, ListingEntry, ListingTags};

  fn entry(listing_type: Option<&str>, score: Option<f64>) -> ListingEntry {
    ListingEntry {
      listing: Listing {
        id: "l1".to_string(),
        title: "Habitat avec jardin".to_string(),
        description: "Un beau potager communautaire".to_string(),
        location: Some("Ottignies".to_string()),
        province: Some("Brabant Wallon".to_string()),
        price_amount: Some(600.0),
        listing_type: listing_type.map(str::to_string),
        ..Default::default()
      },
      evaluation: score.map(|score| Evaluation {
        listing_id: "l1".to_string(),
        quality_score: Some(score),
        ..Default::default()
      }),
      ..Default::default()
    }
  }

  #[test]
  fn quality_gate_drops_noise() {
    assert!(quality_gate(&entry(Some("offre-location"), Some(70.0))));
    assert!(!quality_gate(&entry(Some("offre-location"), None)), "unevaluated entries are dropped");
    assert!(!quality_gate(&entry(Some("offre-location"), Some(10.0))), "below the floor");
    assert!(quality_gate(&entry(Some("offre-location"), Some(15.0))), "floor is inclusive");
    assert!(!quality_gate(&entry(Some("spam-category"), Some(80.0))), "unrecognized category");
    assert!(!quality_gate(&entry(None, Some(80.0))));
  }

  #[test]
  fn default_filters_pass_everything() {
    let entries = [entry(Some("offre-location"), Some(70.0)), entry(None, None)];

    for entry in &entries {
      assert!(passes_ui_filters(entry, &UiFilters::default(), None));
      assert!(passes_tag_filters(entry, &TagFilters::default()));
      assert!(passes_refinement_filters(entry, &RefinementFilters::default(), None));
    }
  }

  #[test]
  fn search_is_case_insensitive_and_trimmed() {
    let e = entry(Some("offre-location"), Some(70.0));

    assert!(passes_ui_filters(&e, &UiFilters { search_text: "  JARDIN  ".to_string(), ..Default::default() }, None));
    assert!(passes_ui_filters(&e, &UiFilters { search_text: "potager".to_string(), ..Default::default() }, None));
    assert!(!passes_ui_filters(&e, &UiFilters { search_text: "chateau".to_string(), ..Default::default() }, None));
  }

  #[test]
  fn province_filter_requires_presence() {
    let mut e = entry(Some("offre-location"), Some(70.0));
    let filters = UiFilters {
      provinces: vec!["Brabant Wallon".to_string()],
      ..Default::default()
    };

    assert!(passes_ui_filters(&e, &filters, None));

    e.listing.province = None;

    assert!(!passes_ui_filters(&e, &filters, None));
  }

  #[test]
  fn price_bounds_honor_null_escape() {
    let mut e = entry(Some("offre-location"), Some(70.0));
    let mut filters = UiFilters {
      price_max: Some(500.0),
      ..Default::default()
    };

    assert!(!passes_ui_filters(&e, &filters, None));

    e.listing.price_amount = None;

    assert!(passes_ui_filters(&e, &filters, None), "null price passes while the escape flag is on");

    filters.include_null_price = false;

    assert!(!passes_ui_filters(&e, &filters, None));
  }

  #[test]
  fn score_bound_prefers_adjusted_score() {
    let e = entry(Some("offre-location"), Some(40.0));
    let filters = UiFilters {
      score_min: Some(60.0),
      ..Default::default()
    };

    assert!(!passes_ui_filters(&e, &filters, None));
    assert!(passes_ui_filters(&e, &filters, Some(75.0)));

    let unscored = entry(Some("offre-location"), None);

    assert!(passes_ui_filters(&unscored, &filters, None));
    assert!(!passes_ui_filters(&unscored, &UiFilters { include_unscored: false, ..filters }, None));
  }

  #[test]
  fn refinement_include_requires_known_type() {
    let filters = RefinementFilters {
      listing_types_include: vec!["offre-location".to_string()],
      ..Default::default()
    };

    assert!(passes_refinement_filters(&entry(Some("offre-location"), Some(70.0)), &filters, None));
    assert!(!passes_refinement_filters(&entry(Some("offre-vente"), Some(70.0)), &filters, None));
    assert!(!passes_refinement_filters(&entry(None, Some(70.0)), &filters, None), "untyped listings fail an include list");
  }

  #[test]
  fn refinement_exclude_spares_untyped() {
    let filters = RefinementFilters {
      listing_types_exclude: vec!["offre-vente".to_string()],
      ..Default::default()
    };

    assert!(!passes_refinement_filters(&entry(Some("offre-vente"), Some(70.0)), &filters, None));
    assert!(passes_refinement_filters(&entry(None, Some(70.0)), &filters, None));
  }

  #[test]
  fn refinement_locations_match_location_and_province() {
    let e = entry(Some("offre-location"), Some(70.0));

    let include = RefinementFilters {
      locations_include: vec!["brabant".to_string()],
      ..Default::default()
    };

    assert!(passes_refinement_filters(&e, &include, None));

    let exclude = RefinementFilters {
      locations_exclude: vec!["ottignies".to_string()],
      ..Default::default()
    };

    assert!(!passes_refinement_filters(&e, &exclude, None));
  }

  #[test]
  fn refinement_max_price_spares_null_prices() {
    let filters = RefinementFilters {
      max_price: Some(500.0),
      ..Default::default()
    };

    assert!(!passes_refinement_filters(&entry(Some("offre-location"), Some(70.0)), &filters, None));

    let mut unpriced = entry(Some("offre-location"), Some(70.0));
    unpriced.listing.price_amount = None;

    assert!(passes_refinement_filters(&unpriced, &filters, None));
  }

  #[test]
  fn refinement_min_score_requires_a_score() {
    let filters = RefinementFilters {
      min_score: Some(50.0),
      ..Default::default()
    };

    assert!(passes_refinement_filters(&entry(Some("offre-location"), Some(70.0)), &filters, None));
    assert!(!passes_refinement_filters(&entry(Some("offre-location"), Some(30.0)), &filters, None));
    assert!(!passes_refinement_filters(&entry(Some("offre-location"), None), &filters, None));
    assert!(passes_refinement_filters(&entry(Some("offre-location"), Some(30.0)), &filters, Some(60.0)));
  }

  #[test]
  fn tag_filters_fail_on_unknown_values() {
    let mut e = entry(Some("offre-location"), Some(70.0));
    let filters = TagFilters {
      pets_allowed: TriState::Yes,
      ..Default::default()
    };

    assert!(!passes_tag_filters(&e, &filters), "no tags at all");

    e.tags = Some(ListingTags {
      pets_allowed: None,
      ..Default::default()
    });

    assert!(!passes_tag_filters(&e, &filters), "unknown value fails an explicit yes");

    e.tags = Some(ListingTags {
      pets_allowed: Some(true),
      ..Default::default()
    });

    assert!(passes_tag_filters(&e, &filters));
  }

  #[test]
  fn tag_multi_select_intersects() {
    let mut e = entry(Some("offre-location"), Some(70.0));
    e.tags = Some(ListingTags {
      shared_spaces: vec!["garden".to_string(), "workshop".to_string()],
      ..Default::default()
    });

    let filters = TagFilters {
      shared_spaces: vec!["vegetable_garden".to_string(), "workshop".to_string()],
      ..Default::default()
    };

    assert!(passes_tag_filters(&e, &filters));

    let filters = TagFilters {
      shared_spaces: vec!["laundry".to_string()],
      ..Default::default()
    };

    assert!(!passes_tag_filters(&e, &filters));
  }

  #[test]
  fn tag_numeric_bounds_require_presence() {
    let mut e = entry(Some("offre-location"), Some(70.0));
    e.tags = Some(ListingTags {
      surface_m2: Some(120.0),
      ..Default::default()
    });

    assert!(passes_tag_filters(&e, &TagFilters { min_surface: Some(100.0), ..Default::default() }));
    assert!(!passes_tag_filters(&e, &TagFilters { min_surface: Some(150.0), ..Default::default() }));
    assert!(!passes_tag_filters(&e, &TagFilters { min_bedrooms: Some(2), ..Default::default() }), "absent bedroom count fails the bound");
  }

  #[test]
  fn profile_filters_default_pass() {
    let profile = ProfileCard::default();

    assert!(passes_profile_filters(&profile, &ProfileUiFilters::default()));
    assert!(passes_profile_tag_filters(&profile, &ProfileTagFilters::default()));
  }

  #[test]
  fn profile_region_matches_location_or_preference() {
    let profile = ProfileCard {
      location: Some("Namur".to_string()),
      preferred_regions: vec!["Brabant Wallon".to_string()],
      ..Default::default()
    };

    let by_location = ProfileUiFilters {
      regions: vec!["namur".to_string()],
      ..Default::default()
    };
    let by_preference = ProfileUiFilters {
      regions: vec!["brabant".to_string()],
      ..Default::default()
    };
    let neither = ProfileUiFilters {
      regions: vec!["Flandre".to_string()],
      ..Default::default()
    };

    assert!(passes_profile_filters(&profile, &by_location));
    assert!(passes_profile_filters(&profile, &by_preference));
    assert!(!passes_profile_filters(&profile, &neither));
  }

  #[test]
  fn profile_age_bounds_require_presence() {
    let mut profile = ProfileCard {
      age: Some(45),
      ..Default::default()
    };
    let filters = ProfileUiFilters {
      age_min: Some(40),
      age_max: Some(60),
      ..Default::default()
    };

    assert!(passes_profile_filters(&profile, &filters));

    profile.age = None;

    assert!(!passes_profile_filters(&profile, &filters));
  }

  #[test]
  fn profile_tag_filters_read_answers() {
    let mut answers = crate::model::QuestionnaireAnswers::default();
    answers.insert("community_values".to_string(), AnswerValue::Multi(vec!["ecology".to_string(), "solidarity".to_string()]));
    answers.insert("governance".to_string(), AnswerValue::Text("sociocracy".to_string()));

    let profile = ProfileCard {
      questionnaire_answers: Some(answers),
      ..Default::default()
    };

    let matching = ProfileTagFilters {
      core_values: vec!["ecology".to_string()],
      governance: vec!["sociocracy".to_string()],
      ..Default::default()
    };

    assert!(passes_profile_tag_filters(&profile, &matching));

    let missing_answer = ProfileTagFilters {
      setting_type: vec!["rural".to_string()],
      ..Default::default()
    };

    assert!(!passes_profile_tag_filters(&profile, &missing_answer));
  }
}
