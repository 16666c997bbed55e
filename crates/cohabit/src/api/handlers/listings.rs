use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use libcohabit::{prelude::*, store};
use tracing::instrument;

use crate::api::{
  AppState,
  dto::{NotesPayload, StateResponse, StatusPayload},
  errors::AppError,
  middlewares::json_rejection::TypedJson,
};

#[instrument(skip_all)]
pub async fn get_listing<S: PreferenceStore, P: ScoringProvider>(State(state): State<AppState<S, P>>, Path((id,)): Path<(String,)>) -> Result<(StatusCode, impl IntoResponse), AppError> {
  let Some(entry) = state.entries.iter().find(|entry| entry.listing.id == id) else {
    return Err(AppError::ResourceNotFound);
  };

  let mut entry = entry.clone();

  {
    let store = state.store.read().await;

    UserState::load(&*store).apply_to(std::slice::from_mut(&mut entry));
  }

  Ok((StatusCode::OK, Json(entry)))
}

#[instrument(skip_all)]
pub async fn set_status<S: PreferenceStore, P: ScoringProvider>(
  State(state): State<AppState<S, P>>,
  Path((id,)): Path<(String,)>,
  TypedJson(payload): TypedJson<StatusPayload>,
) -> Result<(StatusCode, impl IntoResponse), AppError> {
  if !state.entries.iter().any(|entry| entry.listing.id == id) {
    return Err(AppError::ResourceNotFound);
  }

  let mut store = state.store.write().await;
  let mut user = UserState::load(&*store);

  user.set_status(&mut *store, &id, payload.status)?;

  Ok((StatusCode::NO_CONTENT, ()))
}

#[instrument(skip_all)]
pub async fn set_notes<S: PreferenceStore, P: ScoringProvider>(
  State(state): State<AppState<S, P>>,
  Path((id,)): Path<(String,)>,
  TypedJson(payload): TypedJson<NotesPayload>,
) -> Result<(StatusCode, impl IntoResponse), AppError> {
  if !state.entries.iter().any(|entry| entry.listing.id == id) {
    return Err(AppError::ResourceNotFound);
  }

  let mut store = state.store.write().await;
  let mut user = UserState::load(&*store);

  user.set_notes(&mut *store, &id, &payload.notes)?;

  Ok((StatusCode::NO_CONTENT, ()))
}

#[instrument(skip_all)]
pub async fn get_state<S: PreferenceStore, P: ScoringProvider>(State(state): State<AppState<S, P>>) -> Result<(StatusCode, impl IntoResponse), AppError> {
  let mut store = state.store.write().await;
  let mut user = UserState::load(&*store);
  let answers = store::saved_answers(&*store);

  let previous = user.touch_visit(&mut *store)?;
  let new_listings = state.entries.iter().filter(|entry| quality_gate(entry)).filter(|entry| user.new_since(entry, previous.as_deref())).count();

  Ok((
    StatusCode::OK,
    Json(StateResponse {
      statuses: user.statuses,
      notes: user.notes,
      last_visit: user.last_visit,
      new_listings,
      answers,
    }),
  ))
}
