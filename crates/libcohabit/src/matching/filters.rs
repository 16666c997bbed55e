use serde::{Deserialize, Serialize};
use serde_inline_default::serde_inline_default;

/// A boolean constraint that can be left unset. `Unset` never excludes
/// anything; `Yes`/`No` require the entity's value to equal that boolean
/// exactly, so an unknown (absent) value fails the constraint.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum TriState {
  #[default]
  Unset,
  Yes,
  No,
}

impl TriState {
  pub fn matches(&self, value: Option<bool>) -> bool {
    match self {
      TriState::Unset => true,
      TriState::Yes => value == Some(true),
      TriState::No => value == Some(false),
    }
  }
}

impl From<Option<bool>> for TriState {
  fn from(value: Option<bool>) -> Self {
    match value {
      None => TriState::Unset,
      Some(true) => TriState::Yes,
      Some(false) => TriState::No,
    }
  }
}

impl From<TriState> for Option<bool> {
  fn from(value: TriState) -> Self {
    match value {
      TriState::Unset => None,
      TriState::Yes => Some(true),
      TriState::No => Some(false),
    }
  }
}

/// Manually-set filters from the main filter panel. The default value
/// constrains nothing.
#[serde_inline_default]
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct UiFilters {
  #[serde(default)]
  pub search_text: String,
  #[serde(default)]
  pub provinces: Vec<String>,
  #[serde(default)]
  pub listing_types: Vec<String>,
  #[serde(default)]
  pub price_min: Option<f64>,
  #[serde(default)]
  pub price_max: Option<f64>,
  #[serde_inline_default(true)]
  pub include_null_price: bool,
  #[serde(default)]
  pub score_min: Option<f64>,
  #[serde_inline_default(true)]
  pub include_unscored: bool,
}

impl Default for UiFilters {
  fn default() -> Self {
    UiFilters {
      search_text: String::new(),
      provinces: vec![],
      listing_types: vec![],
      price_min: None,
      price_max: None,
      include_null_price: true,
      score_min: None,
      include_unscored: true,
    }
  }
}

/// Tag-based filters. Multi-select lists are "any match", numeric bounds
/// require the tag to be present, tri-states follow [`TriState`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TagFilters {
  pub project_types: Vec<String>,
  pub environments: Vec<String>,
  pub shared_spaces: Vec<String>,
  pub values: Vec<String>,
  pub pets_allowed: TriState,
  pub has_children: TriState,
  pub has_charter: TriState,
  pub shared_meals: Vec<String>,
  pub unit_types: Vec<String>,
  pub min_bedrooms: Option<u32>,
  pub min_surface: Option<f64>,
  pub max_surface: Option<f64>,
  pub age_range: Vec<String>,
  pub family_types: Vec<String>,
  pub min_group_size: Option<u32>,
  pub max_group_size: Option<u32>,
  pub pet_details: Vec<String>,
  pub furnished: TriState,
  pub accessible_pmr: TriState,
  pub governance: Vec<String>,
  pub near_nature: TriState,
  pub near_transport: TriState,
  pub availability_status: Vec<String>,
}

/// Hard filters produced by the questionnaire mapper (or edited by hand in
/// the refinement panel).
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RefinementFilters {
  pub listing_types_include: Vec<String>,
  pub listing_types_exclude: Vec<String>,
  pub locations_include: Vec<String>,
  pub locations_exclude: Vec<String>,
  pub max_price: Option<f64>,
  pub min_score: Option<f64>,
  pub keywords_include: Vec<String>,
  pub keywords_exclude: Vec<String>,
}

pub(crate) const WEIGHT_MIN: f64 = 0.2;
pub(crate) const WEIGHT_MAX: f64 = 3.0;

/// Per-criterion weights for the refined score. Neutral weight is 1.0; the
/// mapper nudges these and clamps them so no single answer can zero out or
/// dominate scoring.
#[serde_inline_default]
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct RefinementWeights {
  #[serde_inline_default(1.0)]
  pub community_size_and_maturity: f64,
  #[serde_inline_default(1.0)]
  pub values_alignment: f64,
  #[serde_inline_default(1.0)]
  pub common_projects: f64,
  #[serde_inline_default(1.0)]
  pub large_hall_biodanza: f64,
  #[serde_inline_default(1.0)]
  pub rental_price: f64,
  #[serde_inline_default(1.0)]
  pub unit_type: f64,
  #[serde_inline_default(1.0)]
  pub parking: f64,
  #[serde_inline_default(1.0)]
  pub spiritual_alignment: f64,
  #[serde_inline_default(1.0)]
  pub charter_openness: f64,
  #[serde_inline_default(1.0)]
  pub community_meals: f64,
  #[serde_inline_default(1.0)]
  pub location_brussels: f64,
  #[serde_inline_default(1.0)]
  pub near_hospital: f64,
}

impl Default for RefinementWeights {
  fn default() -> Self {
    RefinementWeights {
      community_size_and_maturity: 1.0,
      values_alignment: 1.0,
      common_projects: 1.0,
      large_hall_biodanza: 1.0,
      rental_price: 1.0,
      unit_type: 1.0,
      parking: 1.0,
      spiritual_alignment: 1.0,
      charter_openness: 1.0,
      community_meals: 1.0,
      location_brussels: 1.0,
      near_hospital: 1.0,
    }
  }
}

impl RefinementWeights {
  pub(crate) fn as_array(&self) -> [f64; 12] {
    [
      self.community_size_and_maturity,
      self.values_alignment,
      self.common_projects,
      self.large_hall_biodanza,
      self.rental_price,
      self.unit_type,
      self.parking,
      self.spiritual_alignment,
      self.charter_openness,
      self.community_meals,
      self.location_brussels,
      self.near_hospital,
    ]
  }

  fn each_mut(&mut self) -> [&mut f64; 12] {
    [
      &mut self.community_size_and_maturity,
      &mut self.values_alignment,
      &mut self.common_projects,
      &mut self.large_hall_biodanza,
      &mut self.rental_price,
      &mut self.unit_type,
      &mut self.parking,
      &mut self.spiritual_alignment,
      &mut self.charter_openness,
      &mut self.community_meals,
      &mut self.location_brussels,
      &mut self.near_hospital,
    ]
  }

  pub fn clamp_all(&mut self) {
    for weight in self.each_mut() {
      *weight = weight.clamp(WEIGHT_MIN, WEIGHT_MAX);
    }
  }

  pub fn min(&self) -> f64 {
    self.as_array().into_iter().fold(f64::INFINITY, f64::min)
  }

  pub fn max(&self) -> f64 {
    self.as_array().into_iter().fold(f64::NEG_INFINITY, f64::max)
  }
}

/// Person-side filters from the profile filter panel.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProfileUiFilters {
  pub regions: Vec<String>,
  pub genders: Vec<String>,
  pub age_min: Option<u32>,
  pub age_max: Option<u32>,
  pub community_size: Vec<String>,
}

/// Person-side tag filters, matched against the profile's questionnaire
/// answers.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProfileTagFilters {
  pub core_values: Vec<String>,
  pub setting_type: Vec<String>,
  pub target_audience: Vec<String>,
  pub governance: Vec<String>,
  pub shared_spaces: Vec<String>,
  pub meals_together: Vec<String>,
  pub financial_model: Vec<String>,
  pub unit_types: Vec<String>,
  pub pets_allowed: Vec<String>,
  pub accessibility: Vec<String>,
  pub project_stage: Vec<String>,
  pub housing_type: Vec<String>,
}
