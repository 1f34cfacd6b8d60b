//! Error types for `sakshya-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown statement type: {0:?}")]
  UnknownStatementType(String),

  #[error("unknown classification: {0:?}")]
  UnknownClassification(String),

  #[error("unsupported language code: {0:?}")]
  UnsupportedLanguage(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
