//! Error types for `sakshya-ocr`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unsupported file format: {0:?}")]
  UnsupportedFormat(String),

  #[error("no OCR engine available: {0}")]
  EngineUnavailable(String),

  #[error("image decode error: {0}")]
  Image(#[from] image::ImageError),

  #[error("PDF text extraction failed: {0}")]
  Pdf(String),

  #[error("OCR engine error: {0}")]
  Engine(String),

  #[error("OCR service returned {status}: {body}")]
  Remote { status: u16, body: String },

  #[error("HTTP request failed: {0}")]
  Http(#[from] reqwest::Error),

  #[error("background task failed: {0}")]
  Join(#[from] tokio::task::JoinError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
