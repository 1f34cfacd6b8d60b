//! Error types for `sakshya-gemini`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("no Gemini API key configured")]
  MissingCredentials,

  #[error("HTTP request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("Gemini returned {status}: {body}")]
  Api { status: u16, body: String },

  #[error("Gemini returned no candidates")]
  EmptyResponse,

  #[error("malformed model output: {0}")]
  Json(#[from] serde_json::Error),

  #[error(transparent)]
  Core(#[from] sakshya_core::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
