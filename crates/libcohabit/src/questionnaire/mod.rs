mod mapper;
mod regions;

use serde::Serialize;

use crate::{
  matching::filters::{RefinementFilters, RefinementWeights, TagFilters},
  model::{AnswerValue, QuestionnaireAnswers},
};

pub use mapper::map_answers;

/// The deterministic output of the questionnaire mapper: criterion weights,
/// hard filters and tag filters, plus a human-readable summary of what was
/// derived.
#[derive(Clone, Debug, Serialize)]
pub struct MappedProfile {
  pub weights: RefinementWeights,
  pub filters: RefinementFilters,
  pub tag_filters: TagFilters,
  pub is_active: bool,
  pub summary: Vec<String>,
}

pub(crate) fn get_str<'a>(answers: &'a QuestionnaireAnswers, key: &str) -> Option<&'a str> {
  match answers.get(key) {
    Some(AnswerValue::Text(value)) => Some(value),
    _ => None,
  }
}

pub(crate) fn get_arr<'a>(answers: &'a QuestionnaireAnswers, key: &str) -> &'a [String] {
  match answers.get(key) {
    Some(AnswerValue::Multi(values)) => values,
    _ => &[],
  }
}

pub(crate) fn get_num(answers: &QuestionnaireAnswers, key: &str) -> Option<f64> {
  match answers.get(key) {
    Some(AnswerValue::Number(value)) => Some(*value),
    _ => None,
  }
}
