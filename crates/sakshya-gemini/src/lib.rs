//! Gemini-backed implementations of the Sakshya collaborator traits.
//!
//! [`GeminiBackend`] implements [`EventExtractor`], [`PairClassifier`] and
//! [`Translator`] over the Generative Language REST API. Without an API key
//! it still constructs: extraction and translation report
//! [`Error::MissingCredentials`], and classification answers with a fixed
//! mock verdict.
//!
//! [`EventExtractor`]: sakshya_core::services::EventExtractor
//! [`PairClassifier`]: sakshya_core::services::PairClassifier
//! [`Translator`]: sakshya_core::services::Translator

mod backend;
mod client;
pub mod error;
pub mod parse;
pub mod prompts;

pub use backend::{GeminiBackend, MOCK_EXPLANATION};
pub use client::{GeminiClient, GeminiConfig, ResponseFormat};
pub use error::{Error, Result};
