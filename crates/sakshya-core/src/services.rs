//! Collaborator traits for the model-backed steps of an analysis.
//!
//! The traits are implemented by adapters (e.g. `sakshya-gemini`). They may
//! fail freely; [`crate::pipeline`] turns every failure into the
//! conservative outcome, so implementations do not need to fail safe
//! themselves.
//!
//! All methods return `Send` futures so the traits can be used in
//! multi-threaded async runtimes (e.g. tokio with `axum`).

use std::future::Future;

use crate::{
  comparison::ComparisonResult,
  event::{Event, StatementType},
  language::Language,
};

/// Turns statement text into events.
pub trait EventExtractor: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Extract the events asserted in `text`. Every returned event carries
  /// `statement_type`, whatever the model said.
  fn extract(
    &self,
    text: &str,
    statement_type: StatementType,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send;
}

/// Labels the relationship between two events.
pub trait PairClassifier: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn classify(
    &self,
    event1: &Event,
    event2: &Event,
  ) -> impl Future<Output = Result<ComparisonResult, Self::Error>> + Send;
}

/// Machine translation between supported languages.
pub trait Translator: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Translate `text`. Only called with `from != to` and non-empty text.
  fn translate(
    &self,
    text: &str,
    from: Language,
    to: Language,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}
