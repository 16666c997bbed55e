use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use libcohabit::{
  personalize::validate_extraction,
  prelude::*,
  store::keys,
};
use tracing::instrument;

use crate::api::{
  AppState,
  dto::{ExtractPayload, MapPayload},
  errors::AppError,
  middlewares::json_rejection::TypedJson,
};

#[instrument(skip_all)]
pub async fn map_questionnaire<S: PreferenceStore, P: ScoringProvider>(
  State(state): State<AppState<S, P>>,
  TypedJson(payload): TypedJson<MapPayload>,
) -> Result<(StatusCode, impl IntoResponse), AppError> {
  let profile = map_answers(&payload.answers);

  {
    let mut store = state.store.write().await;

    store.set_serialized(keys::QUESTIONNAIRE_ANSWERS, &payload.answers)?;
    store.set_serialized(keys::REFINEMENT_STATE, &profile)?;
  }

  tracing::info!(active = profile.is_active, derived = profile.summary.len(), "mapped questionnaire answers");

  Ok((StatusCode::OK, Json(profile)))
}

#[instrument(skip_all)]
pub async fn extract_questionnaire<S: PreferenceStore, P: ScoringProvider>(
  State(state): State<AppState<S, P>>,
  TypedJson(payload): TypedJson<ExtractPayload>,
) -> Result<(StatusCode, impl IntoResponse), AppError> {
  let outcome = state.scoring.extract(&payload.transcript).await?;

  validate_extraction(&outcome)?;

  tracing::info!(answers = outcome.answers.len(), "extracted questionnaire answers from transcript");

  Ok((StatusCode::OK, Json(outcome)))
}
