use std::sync::Arc;

use axum::{
  Router,
  extract::Request,
  middleware,
  routing::{get, post, put},
};
use libcohabit::prelude::*;
use libcohabit::store::keys;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api::{config::Config, middlewares::RequestId};

pub mod config;
pub mod dto;
pub mod errors;

pub mod handlers;
mod middlewares;

pub struct AppState<S: PreferenceStore, P: ScoringProvider> {
  pub config: Config,
  pub scoring: P,
  pub entries: Arc<Vec<ListingEntry>>,
  pub profiles: Arc<Vec<ProfileCard>>,
  pub store: Arc<RwLock<S>>,
  pub cache: Arc<RwLock<PersonalizationCache>>,
}

// Derived Clone would require S: Clone, which the store behind the lock does
// not need.
impl<S: PreferenceStore, P: ScoringProvider> Clone for AppState<S, P> {
  fn clone(&self) -> Self {
    AppState {
      config: self.config.clone(),
      scoring: self.scoring.clone(),
      entries: self.entries.clone(),
      profiles: self.profiles.clone(),
      store: self.store.clone(),
      cache: self.cache.clone(),
    }
  }
}

pub fn routes<S: PreferenceStore, P: ScoringProvider>(config: &Config, store: S, scoring: P, entries: Vec<ListingEntry>, profiles: Vec<ProfileCard>) -> Router {
  let cache: PersonalizationCache = store.get_or_default(keys::PERSONALIZATION);

  let state = AppState {
    config: config.clone(),
    scoring,
    entries: Arc::new(entries),
    profiles: Arc::new(profiles),
    store: Arc::new(RwLock::new(store)),
    cache: Arc::new(RwLock::new(cache)),
  };

  Router::new()
    .route("/match", post(handlers::match_listings))
    .route("/profiles/match", post(handlers::match_profiles))
    .route("/listings/{id}", get(handlers::get_listing))
    .route("/listings/{id}/status", put(handlers::set_status))
    .route("/listings/{id}/notes", put(handlers::set_notes))
    .route("/questionnaire/map", post(handlers::map_questionnaire))
    .route("/questionnaire/extract", post(handlers::extract_questionnaire))
    .route("/personalize", post(handlers::personalize))
    .route("/state", get(handlers::get_state))
    .fallback(handlers::not_found)
    .layer(TraceLayer::new_for_http().make_span_with(|req: &Request| {
      let request_id = req.extensions().get::<RequestId>().map(|id| id.0).unwrap_or_else(Uuid::new_v4);

      tracing::info_span!("request", %request_id)
    }))
    // The routes below will not go through the observability middlewares above
    .route("/healthz", get(handlers::healthz))
    .layer(middleware::from_fn(middlewares::logging::api_logger))
    .layer(middleware::from_fn(middlewares::request_id))
    .with_state(state)
}
