use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use libcohabit::prelude::*;
use tracing::instrument;

use crate::api::{
  AppState,
  dto::{MatchHit, MatchPayload, MatchResponse},
  errors::AppError,
  middlewares::json_rejection::TypedJson,
};

#[instrument(skip_all)]
pub async fn match_listings<S: PreferenceStore, P: ScoringProvider>(
  State(state): State<AppState<S, P>>,
  TypedJson(payload): TypedJson<MatchPayload>,
) -> Result<(StatusCode, impl IntoResponse), AppError> {
  let mut entries = state.entries.as_ref().clone();

  {
    let store = state.store.read().await;

    UserState::load(&*store).apply_to(&mut entries);
  }

  let mut match_state = payload.state;
  match_state.personal = state.cache.read().await.scores_by_id();

  let outcome = match_and_sort(&entries, &match_state);
  let MatchOutcome { entries, facets, adjusted, .. } = outcome;

  let limit = payload.limit.unwrap_or(state.config.page_size);
  let total = entries.len();

  let results = entries
    .into_iter()
    .skip(payload.offset)
    .take(limit)
    .map(|entry| {
      let distance_km = listing_coordinates(&entry.listing).map(|point| haversine(match_state.reference, point));
      let adjusted_score = adjusted.get(&entry.listing.id).copied();

      MatchHit { entry, distance_km, adjusted_score }
    })
    .collect::<Vec<_>>();

  Ok((
    StatusCode::OK,
    Json(MatchResponse {
      total,
      offset: payload.offset,
      limit,
      results,
      facets,
    }),
  ))
}
