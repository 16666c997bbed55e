mod listings;
mod match_listings;
mod match_profiles;
mod personalize;
mod questionnaire;

use axum::{http::StatusCode, response::IntoResponse};

use crate::api::errors::AppError;

pub use self::listings::{get_listing, get_state, set_notes, set_status};
pub use self::match_listings::match_listings;
pub use self::match_profiles::match_profiles;
pub use self::personalize::personalize;
pub use self::questionnaire::{extract_questionnaire, map_questionnaire};

pub async fn not_found() -> impl IntoResponse {
  AppError::ResourceNotFound
}

pub async fn healthz() -> StatusCode {
  StatusCode::OK
}
