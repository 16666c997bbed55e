use std::collections::HashMap;

use ahash::RandomState;
use libcohabit::prelude::*;
use serde::{Deserialize, Serialize};
use serde_inline_default::serde_inline_default;
use validator::Validate;

#[serde_inline_default]
#[derive(Clone, Debug, Deserialize, Validate)]
pub(crate) struct MatchPayload {
  #[serde(flatten)]
  pub state: MatchState,

  #[serde_inline_default(0)]
  pub offset: usize,
  #[serde(default)]
  #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
  pub limit: Option<usize>,
}

#[derive(Serialize)]
pub(crate) struct MatchResponse {
  pub total: usize,
  pub offset: usize,
  pub limit: usize,
  pub results: Vec<MatchHit>,
  pub facets: ListingFacets,
}

#[derive(Serialize)]
pub(crate) struct MatchHit {
  #[serde(flatten)]
  pub entry: ListingEntry,

  pub distance_km: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub adjusted_score: Option<f64>,
}

#[serde_inline_default]
#[derive(Clone, Debug, Deserialize, Validate)]
pub(crate) struct ProfilesPayload {
  #[serde(flatten)]
  pub state: ProfileState,

  #[serde_inline_default(0)]
  pub offset: usize,
  #[serde(default)]
  #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
  pub limit: Option<usize>,
}

#[derive(Serialize)]
pub(crate) struct ProfilesResponse {
  pub total: usize,
  pub offset: usize,
  pub limit: usize,
  pub results: Vec<ProfileCard>,
  pub facets: ProfileFacets,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub(crate) struct MapPayload {
  #[serde(default)]
  pub answers: QuestionnaireAnswers,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub(crate) struct ExtractPayload {
  #[validate(length(min = 10, message = "transcript is too short to extract preferences from"))]
  pub transcript: String,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub(crate) struct PersonalizePayload {
  #[validate(length(min = 10, message = "criteria are too short to score against"))]
  pub criteria: String,

  // Empty means "score everything that passes the quality gate".
  #[serde(default)]
  pub listing_ids: Vec<String>,
}

#[derive(Serialize)]
pub(crate) struct PersonalizeResponse {
  pub criteria: String,
  pub results: Vec<PersonalizedResult>,
  pub fresh: bool,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub(crate) struct StatusPayload {
  pub status: ListingStatus,
}

#[derive(Clone, Debug, Deserialize, Validate)]
pub(crate) struct NotesPayload {
  #[validate(length(max = 10000, message = "notes are limited to 10000 characters"))]
  pub notes: String,
}

#[derive(Serialize)]
pub(crate) struct StateResponse {
  pub statuses: HashMap<String, ListingStatus, RandomState>,
  pub notes: HashMap<String, String, RandomState>,
  pub last_visit: Option<String>,
  pub new_listings: usize,
  pub answers: QuestionnaireAnswers,
}
