use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use libcohabit::prelude::*;
use tracing::instrument;

use crate::api::{
  AppState,
  dto::{ProfilesPayload, ProfilesResponse},
  errors::AppError,
  middlewares::json_rejection::TypedJson,
};

#[instrument(skip_all)]
pub async fn match_profiles<S: PreferenceStore, P: ScoringProvider>(
  State(state): State<AppState<S, P>>,
  TypedJson(payload): TypedJson<ProfilesPayload>,
) -> Result<(StatusCode, impl IntoResponse), AppError> {
  let outcome = libcohabit::prelude::match_profiles(&state.profiles, &payload.state);

  let limit = payload.limit.unwrap_or(state.config.page_size);
  let total = outcome.profiles.len();
  let results = outcome.profiles.into_iter().skip(payload.offset).take(limit).collect::<Vec<_>>();

  Ok((
    StatusCode::OK,
    Json(ProfilesResponse {
      total,
      offset: payload.offset,
      limit,
      results,
      facets: outcome.facets,
    }),
  ))
}
