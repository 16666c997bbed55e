use std::collections::HashMap;

use ahash::RandomState;
use rayon::prelude::*;

use crate::{
  matching::filters::RefinementWeights,
  model::{CriteriaScores, ListingEntry},
};

/// Recombine per-criterion sub-scores (0-10 each) under the given weights
/// into a 0-100 score.
pub fn refined_score(criteria: &CriteriaScores, weights: &RefinementWeights) -> f64 {
  let mut weighted = 0.0;
  let mut total = 0.0;

  for (score, weight) in criteria.as_array().into_iter().zip(weights.as_array()) {
    weighted += score * weight;
    total += weight;
  }

  if total == 0.0 {
    return 0.0;
  }

  ((weighted / total) * 10.0).round()
}

/// Refined scores for every entry that carries criteria sub-scores, keyed by
/// listing id.
pub fn adjusted_scores(entries: &[ListingEntry], weights: &RefinementWeights) -> HashMap<String, f64, RandomState> {
  entries
    .par_iter()
    .filter_map(|entry| {
      let criteria = entry.evaluation.as_ref().and_then(|evaluation| evaluation.criteria_scores.as_ref())?;

      Some((entry.listing.id.clone(), refined_score(criteria, weights)))
    })
    .collect()
}
