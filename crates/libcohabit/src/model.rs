use std::collections::HashMap;

use ahash::RandomState;
use serde::{Deserialize, Serialize};

/// A single raw answer: free text, a multi-select, or a slider value.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
  Number(f64),
  Text(String),
  Multi(Vec<String>),
}

/// Raw questionnaire answers, keyed by question id. Partially filled at any
/// time; unknown keys are carried along untouched.
pub type QuestionnaireAnswers = HashMap<String, AnswerValue, RandomState>;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Listing {
  pub id: String,
  pub source: String,
  pub source_url: String,
  pub title: String,
  pub description: String,
  pub location: Option<String>,
  pub province: Option<String>,
  pub country: Option<String>,
  pub price: Option<String>,
  pub price_amount: Option<f64>,
  pub listing_type: Option<String>,
  pub latitude: Option<f64>,
  pub longitude: Option<f64>,
  pub contact: Option<String>,
  pub images: Vec<String>,
  pub original_language: Option<String>,
  pub date_published: Option<String>,
  pub date_scraped: String,
}

impl Listing {
  /// Lowercased location and province, used by the substring predicates.
  pub(crate) fn location_text(&self) -> String {
    format!("{} {}", self.location.as_deref().unwrap_or_default(), self.province.as_deref().unwrap_or_default()).to_lowercase()
  }
}

/// Per-criterion sub-scores produced by the external evaluation service,
/// each on a 0-10 scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CriteriaScores {
  pub community_size_and_maturity: f64,
  pub values_alignment: f64,
  pub common_projects: f64,
  pub large_hall_biodanza: f64,
  pub rental_price: f64,
  pub unit_type: f64,
  pub parking: f64,
  pub spiritual_alignment: f64,
  pub charter_openness: f64,
  pub community_meals: f64,
  pub location_brussels: f64,
  pub near_hospital: f64,
}

impl CriteriaScores {
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
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
  LikelyAvailable,
  PossiblyExpired,
  Unknown,
}

impl AvailabilityStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      AvailabilityStatus::LikelyAvailable => "likely_available",
      AvailabilityStatus::PossiblyExpired => "possibly_expired",
      AvailabilityStatus::Unknown => "unknown",
    }
  }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Evaluation {
  pub listing_id: String,
  pub quality_score: Option<f64>,
  pub overall_score: Option<f64>,
  pub match_summary: String,
  pub criteria_scores: Option<CriteriaScores>,
  pub highlights: Vec<String>,
  pub concerns: Vec<String>,
  pub availability_status: Option<AvailabilityStatus>,
  pub date_evaluated: Option<String>,
}

impl Evaluation {
  /// The headline score, from whichever field the evaluator filled in.
  pub fn score(&self) -> Option<f64> {
    self.quality_score.or(self.overall_score)
  }
}

/// Structured facts extracted from listing free text. Every field is
/// independently optional: absence means "unknown", never "false".
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListingTags {
  pub listing_id: String,
  pub group_size: Option<u32>,
  pub age_range: Vec<String>,
  pub has_children: Option<bool>,
  pub family_types: Vec<String>,
  pub project_types: Vec<String>,
  pub pets_allowed: Option<bool>,
  pub pet_details: Vec<String>,
  pub surface_m2: Option<f64>,
  pub num_bedrooms: Option<u32>,
  pub unit_type: Option<String>,
  pub furnished: Option<bool>,
  pub accessible_pmr: Option<bool>,
  pub shared_spaces: Vec<String>,
  pub values: Vec<String>,
  pub shared_meals: Option<String>,
  pub has_charter: Option<bool>,
  pub governance: Option<String>,
  pub environment: Option<String>,
  pub near_nature: Option<bool>,
  pub near_transport: Option<bool>,
  pub date_extracted: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
  #[default]
  New,
  Favorite,
  Contacted,
  VisitPlanned,
  InDiscussion,
  Rejected,
  Archived,
}

/// Named lifecycle views over [`ListingStatus`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusView {
  #[default]
  All,
  Active,
  New,
  Favorite,
  Contacted,
  VisitPlanned,
  InDiscussion,
  Rejected,
  Archived,
}

impl StatusView {
  /// "all" hides discarded entries, "active" is the in-progress subset,
  /// everything else matches one status exactly.
  pub fn allows(&self, status: ListingStatus) -> bool {
    match self {
      StatusView::All => !matches!(status, ListingStatus::Archived | ListingStatus::Rejected),
      StatusView::Active => matches!(status, ListingStatus::Contacted | ListingStatus::VisitPlanned | ListingStatus::InDiscussion),
      StatusView::New => status == ListingStatus::New,
      StatusView::Favorite => status == ListingStatus::Favorite,
      StatusView::Contacted => status == ListingStatus::Contacted,
      StatusView::VisitPlanned => status == ListingStatus::VisitPlanned,
      StatusView::InDiscussion => status == ListingStatus::InDiscussion,
      StatusView::Rejected => status == ListingStatus::Rejected,
      StatusView::Archived => status == ListingStatus::Archived,
    }
  }
}

/// A listing joined with its optional evaluation and tags, plus the per-user
/// lifecycle state tracked outside the immutable listing data.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ListingEntry {
  pub listing: Listing,
  pub evaluation: Option<Evaluation>,
  pub tags: Option<ListingTags>,
  #[serde(default)]
  pub status: ListingStatus,
  #[serde(default)]
  pub notes: String,
}

impl ListingEntry {
  pub fn score(&self) -> Option<f64> {
    self.evaluation.as_ref().and_then(Evaluation::score)
  }
}

/// The person-side entity, mirrored on [`Listing`].
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ProfileCard {
  pub id: String,
  pub display_name: String,
  pub avatar_url: Option<String>,
  pub location: Option<String>,
  pub age: Option<u32>,
  pub gender: Option<String>,
  pub ai_summary: Option<String>,
  pub ai_tags: Vec<String>,
  pub budget_range: Option<String>,
  pub preferred_regions: Vec<String>,
  pub community_size: Option<String>,
  pub core_values: Vec<String>,
  pub intro_snippet: Option<String>,
  pub created_at: Option<String>,
  pub questionnaire_answers: Option<QuestionnaireAnswers>,
}

/// One externally computed personalization score for a listing.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct PersonalizedResult {
  pub listing_id: String,
  pub score: f64,
  #[serde(default)]
  pub explanation: String,
}

#[cfg(test)]
mod tests {
  use super::{AnswerValue, ListingStatus, StatusView};

  #[test]
  fn answer_value_untagged_roundtrip() {
    let answers: super::QuestionnaireAnswers = serde_json::from_str(r#"{"budget_max": 700, "locations_avoid": "pas la Flandre", "motivation": ["valeurs", "entraide"]}"#).unwrap();

    assert_eq!(answers["budget_max"], AnswerValue::Number(700.0));
    assert_eq!(answers["locations_avoid"], AnswerValue::Text("pas la Flandre".to_string()));
    assert_eq!(answers["motivation"], AnswerValue::Multi(vec!["valeurs".to_string(), "entraide".to_string()]));
  }

  #[test]
  fn all_view_hides_discarded() {
    assert!(StatusView::All.allows(ListingStatus::New));
    assert!(StatusView::All.allows(ListingStatus::Favorite));
    assert!(!StatusView::All.allows(ListingStatus::Rejected));
    assert!(!StatusView::All.allows(ListingStatus::Archived));
  }

  #[test]
  fn active_view_is_exactly_in_progress() {
    assert!(StatusView::Active.allows(ListingStatus::Contacted));
    assert!(StatusView::Active.allows(ListingStatus::VisitPlanned));
    assert!(StatusView::Active.allows(ListingStatus::InDiscussion));
    assert!(!StatusView::Active.allows(ListingStatus::New));
    assert!(!StatusView::Active.allows(ListingStatus::Favorite));
    assert!(!StatusView::Active.allows(ListingStatus::Rejected));
  }

  #[test]
  fn exact_views_match_single_status() {
    assert!(StatusView::Favorite.allows(ListingStatus::Favorite));
    assert!(!StatusView::Favorite.allows(ListingStatus::New));
    assert!(StatusView::Archived.allows(ListingStatus::Archived));
  }
}
