//! Error types and axum `IntoResponse` implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0}")]
  BadRequest(String),
  #[error(transparent)]
  Ocr(#[from] sakshya_ocr::Error),
}

impl Error {
  fn status(&self) -> StatusCode {
    use sakshya_ocr::Error as Ocr;
    match self {
      Error::BadRequest(_) => StatusCode::BAD_REQUEST,
      Error::Ocr(Ocr::UnsupportedFormat(_)) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
      Error::Ocr(Ocr::EngineUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
      Error::Ocr(Ocr::Image(_) | Ocr::Pdf(_)) => StatusCode::UNPROCESSABLE_ENTITY,
      Error::Ocr(Ocr::Remote { .. } | Ocr::Http(_)) => StatusCode::BAD_GATEWAY,
      Error::Ocr(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      warn!(error = %self, "request failed");
    }
    (status, Json(json!({ "detail": self.to_string() }))).into_response()
  }
}
