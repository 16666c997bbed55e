use std::collections::HashMap;

use ahash::RandomState;
use serde::{Deserialize, Serialize};

use crate::{
  error::CohabitError,
  model::{ListingEntry, PersonalizedResult, QuestionnaireAnswers},
};

/// Listings sent to the scoring service per request.
pub const SCORING_BATCH_SIZE: usize = 10;

/// Minimum recognized answers for a transcript extraction to count.
pub const MIN_EXTRACTED_ANSWERS: usize = 2;

const DESCRIPTION_LIMIT: usize = 500;

/// The condensed view of a listing sent to the scoring service. Descriptions
/// are truncated so batches stay within the upstream prompt budget.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ListingSummary {
  pub id: String,
  pub title: String,
  pub description: String,
  pub location: Option<String>,
  pub country: Option<String>,
  pub price: Option<String>,
  pub listing_type: Option<String>,
  pub tags_summary: Vec<String>,
}

impl ListingSummary {
  pub fn from_entry(entry: &ListingEntry) -> ListingSummary {
    let listing = &entry.listing;

    let mut tags_summary = vec![];

    if let Some(tags) = &entry.tags {
      tags_summary.extend(tags.project_types.iter().cloned());
      tags_summary.extend(tags.values.iter().cloned());
      tags_summary.extend(tags.shared_spaces.iter().cloned());

      if let Some(environment) = &tags.environment {
        tags_summary.push(environment.clone());
      }
    }

    ListingSummary {
      id: listing.id.clone(),
      title: listing.title.clone(),
      description: truncate(&listing.description, DESCRIPTION_LIMIT),
      location: listing.location.clone(),
      country: listing.country.clone(),
      price: listing.price.clone(),
      listing_type: listing.listing_type.clone(),
      tags_summary,
    }
  }
}

fn truncate(text: &str, limit: usize) -> String {
  match text.char_indices().nth(limit) {
    Some((boundary, _)) => text[..boundary].to_string(),
    None => text.to_string(),
  }
}

/// Structured answers recovered from a free-form conversation transcript.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ExtractionOutcome {
  pub answers: QuestionnaireAnswers,
  #[serde(default)]
  pub coverage: Vec<String>,
  #[serde(default)]
  pub summary: String,
}

/// Rejects extractions too thin to build a useful profile from.
pub fn validate_extraction(outcome: &ExtractionOutcome) -> Result<(), CohabitError> {
  if outcome.answers.len() < MIN_EXTRACTED_ANSWERS {
    return Err(CohabitError::InsufficientCoverage {
      got: outcome.answers.len(),
      min: MIN_EXTRACTED_ANSWERS,
    });
  }

  Ok(())
}

/// The external scoring service seam. The HTTP implementation talks to the
/// real service; [`StaticScoringProvider`] serves canned results in tests.
pub trait ScoringProvider: Clone + Send + Sync + 'static {
  fn score(&self, criteria: &str, batch: &[ListingSummary]) -> impl Future<Output = Result<Vec<PersonalizedResult>, CohabitError>> + Send;
  fn extract(&self, transcript: &str) -> impl Future<Output = Result<ExtractionOutcome, CohabitError>> + Send;
}

#[derive(Clone)]
pub struct HttpScoringProvider {
  client: reqwest::Client,
  base_url: Option<String>,
}

#[derive(Serialize)]
struct ScorePayload<'p> {
  criteria: &'p str,
  listings: &'p [ListingSummary],
}

#[derive(Deserialize)]
struct ScoreResponse {
  results: Vec<PersonalizedResult>,
}

#[derive(Serialize)]
struct ExtractPayload<'p> {
  transcript: &'p str,
}

impl HttpScoringProvider {
  pub fn new(base_url: Option<String>) -> HttpScoringProvider {
    HttpScoringProvider {
      client: reqwest::Client::new(),
      base_url,
    }
  }

  fn url(&self, path: &str) -> Result<String, CohabitError> {
    match &self.base_url {
      Some(base) => Ok(format!("{}/{path}", base.trim_end_matches('/'))),
      None => Err(CohabitError::ConfigError("no scoring service configured".to_string())),
    }
  }
}

impl ScoringProvider for HttpScoringProvider {
  async fn score(&self, criteria: &str, batch: &[ListingSummary]) -> Result<Vec<PersonalizedResult>, CohabitError> {
    let url = self.url("score")?;
    let payload = ScorePayload { criteria, listings: batch };

    let response = self.client.post(&url).json(&payload).send().await?.error_for_status()?.json::<ScoreResponse>().await?;

    Ok(response.results)
  }

  async fn extract(&self, transcript: &str) -> Result<ExtractionOutcome, CohabitError> {
    let url = self.url("extract")?;
    let payload = ExtractPayload { transcript };

    Ok(self.client.post(&url).json(&payload).send().await?.error_for_status()?.json::<ExtractionOutcome>().await?)
  }
}

/// Canned provider for tests: scores every listing it is asked about with a
/// fixed value and returns a fixed extraction.
#[derive(Clone, Default)]
pub struct StaticScoringProvider {
  pub score: f64,
  pub extraction: ExtractionOutcome,
}

impl ScoringProvider for StaticScoringProvider {
  async fn score(&self, _: &str, batch: &[ListingSummary]) -> Result<Vec<PersonalizedResult>, CohabitError> {
    Ok(
      batch
        .iter()
        .map(|summary| PersonalizedResult {
          listing_id: summary.id.clone(),
          score: self.score,
          explanation: String::new(),
        })
        .collect(),
    )
  }

  async fn extract(&self, _: &str) -> Result<ExtractionOutcome, CohabitError> {
    Ok(self.extraction.clone())
  }
}

/// Score a whole collection in fixed-size sequential batches.
pub async fn score_all<P: ScoringProvider>(provider: &P, criteria: &str, entries: &[ListingEntry]) -> Result<Vec<PersonalizedResult>, CohabitError> {
  let summaries = entries.iter().map(ListingSummary::from_entry).collect::<Vec<_>>();
  let mut results = vec![];

  for batch in summaries.chunks(SCORING_BATCH_SIZE) {
    results.extend(provider.score(criteria, batch).await?);

    tracing::debug!(scored = results.len(), total = summaries.len(), "personalization batch done");
  }

  Ok(results)
}

/// Personalization scores, valid only for the exact criteria text they were
/// computed against. Results arriving after the criteria changed are
/// discarded instead of poisoning the new profile.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PersonalizationCache {
  criteria: String,
  scores: HashMap<String, PersonalizedResult, RandomState>,
}

impl PersonalizationCache {
  /// Switch to new criteria, dropping every score computed for the old ones.
  pub fn set_criteria(&mut self, criteria: &str) {
    if self.criteria != criteria {
      self.criteria = criteria.to_string();
      self.scores.clear();
    }
  }

  /// Insert results if they were computed for the current criteria; stale
  /// results are dropped.
  pub fn insert_if_current(&mut self, criteria: &str, results: Vec<PersonalizedResult>) -> bool {
    if self.criteria != criteria {
      tracing::debug!("discarding stale personalization results");

      return false;
    }

    for result in results {
      self.scores.insert(result.listing_id.clone(), result);
    }

    true
  }

  pub fn get(&self, listing_id: &str) -> Option<&PersonalizedResult> {
    self.scores.get(listing_id)
  }

  pub fn criteria(&self) -> &str {
    &self.criteria
  }

  /// The flat id-to-score map the sort comparator consumes.
  pub fn scores_by_id(&self) -> HashMap<String, f64, RandomState> {
    self.scores.values().map(|result| (result.listing_id.clone(), result.score)).collect()
  }
}
