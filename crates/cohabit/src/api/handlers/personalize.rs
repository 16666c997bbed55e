use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use libcohabit::{personalize::score_all, prelude::*, store::keys};
use tracing::instrument;

use crate::api::{
  AppState,
  dto::{PersonalizePayload, PersonalizeResponse},
  errors::AppError,
  middlewares::json_rejection::TypedJson,
};

#[instrument(skip_all)]
pub async fn personalize<S: PreferenceStore, P: ScoringProvider>(
  State(state): State<AppState<S, P>>,
  TypedJson(payload): TypedJson<PersonalizePayload>,
) -> Result<(StatusCode, impl IntoResponse), AppError> {
  let entries = state
    .entries
    .iter()
    .filter(|entry| quality_gate(entry))
    .filter(|entry| payload.listing_ids.is_empty() || payload.listing_ids.contains(&entry.listing.id))
    .cloned()
    .collect::<Vec<_>>();

  state.cache.write().await.set_criteria(&payload.criteria);

  // The scoring call runs without holding the cache lock, so a newer request
  // can change the criteria under us; stale results are dropped below.
  let results = score_all(&state.scoring, &payload.criteria, &entries).await?;

  let mut cache = state.cache.write().await;
  let fresh = cache.insert_if_current(&payload.criteria, results.clone());

  if fresh {
    state.store.write().await.set_serialized(keys::PERSONALIZATION, &*cache)?;
  }

  tracing::info!(scored = results.len(), fresh, "personalization pass done");

  Ok((
    StatusCode::OK,
    Json(PersonalizeResponse {
      criteria: payload.criteria,
      results,
      fresh,
    }),
  ))
}
