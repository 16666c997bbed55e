use axum::{
  Json, RequestExt,
  body::Body,
  extract::{FromRequest, rejection::JsonRejection},
  http::{Request, StatusCode},
  response::IntoResponse,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::api::errors::ApiError;

/// JSON extractor that runs `validator` rules after deserialization, so
/// handlers only ever see well-formed payloads.
pub struct TypedJson<T>(pub T);

pub enum TypedJsonRejection {
  Malformed(JsonRejection),
  Invalid(ValidationErrors),
}

impl IntoResponse for TypedJsonRejection {
  fn into_response(self) -> axum::response::Response {
    match self {
      TypedJsonRejection::Malformed(err) => match err {
        JsonRejection::JsonSyntaxError(_) => ApiError(StatusCode::BAD_REQUEST, "request body is not valid JSON".to_string(), None).into_response(),
        JsonRejection::JsonDataError(err) => ApiError(StatusCode::BAD_REQUEST, "request body does not match the expected shape".to_string(), Some(vec![err.to_string()])).into_response(),
        JsonRejection::MissingJsonContentType(_) => ApiError(StatusCode::UNSUPPORTED_MEDIA_TYPE, "expected an application/json body".to_string(), None).into_response(),
        err => ApiError(StatusCode::BAD_REQUEST, "could not read request body".to_string(), Some(vec![err.to_string()])).into_response(),
      },

      TypedJsonRejection::Invalid(errs) => {
        let messages = errs
          .field_errors()
          .into_iter()
          .flat_map(|(field, errors)| {
            errors
              .iter()
              .map(|err| match &err.message {
                Some(message) => message.clone().into_owned(),
                None => format!("{field}: {}", err.code),
              })
              .collect::<Vec<_>>()
          })
          .collect::<Vec<_>>();

        ApiError(StatusCode::UNPROCESSABLE_ENTITY, "payload failed validation".to_string(), Some(messages)).into_response()
      }
    }
  }
}

impl<T, S> FromRequest<S> for TypedJson<T>
where
  T: DeserializeOwned + Validate + 'static,
  S: Send + Sync,
{
  type Rejection = TypedJsonRejection;

  async fn from_request(request: Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
    let Json(payload) = request.extract::<Json<T>, _>().await.map_err(TypedJsonRejection::Malformed)?;

    payload.validate().map_err(TypedJsonRejection::Invalid)?;

    Ok(TypedJson(payload))
  }
}
