//! HTTP surface for Sakshya.
//!
//! Exposes an axum [`Router`] for statement analysis and document upload,
//! backed by any implementation of the model collaborator traits.

pub mod error;
pub mod handlers;

pub use error::Error;

use std::sync::Arc;

use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{get, post},
};
use sakshya_core::{
  cache::ComparisonCache,
  services::{EventExtractor, PairClassifier, Translator},
};
use sakshya_gemini::GeminiConfig;
use sakshya_ocr::{DocumentReader, OcrConfig};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use handlers::{analyze, health, upload};

// ─── Configuration ────────────────────────────────────────────────────────────

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }
fn default_max_upload_bytes() -> usize { 16 * 1024 * 1024 }

/// Runtime server configuration, deserialised from `config.toml` and the
/// `SAKSHYA__*` environment.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:             String,
  #[serde(default = "default_port")]
  pub port:             u16,
  #[serde(default = "default_max_upload_bytes")]
  pub max_upload_bytes: usize,
  #[serde(default)]
  pub gemini:           GeminiConfig,
  #[serde(default)]
  pub ocr:              OcrConfig,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:             default_host(),
      port:             default_port(),
      max_upload_bytes: default_max_upload_bytes(),
      gemini:           GeminiConfig::default(),
      ocr:              OcrConfig::default(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Everything the analysis handlers need from the model backend.
pub trait Backend: EventExtractor + PairClassifier + Translator + 'static {}

impl<T> Backend for T where T: EventExtractor + PairClassifier + Translator + 'static {}

/// Shared state threaded through all axum handlers.
pub struct AppState<B: Backend> {
  pub backend: Arc<B>,
  pub cache:   Arc<ComparisonCache>,
  pub reader:  Arc<DocumentReader>,
  pub config:  Arc<ServerConfig>,
}

impl<B: Backend> Clone for AppState<B> {
  fn clone(&self) -> Self {
    Self {
      backend: Arc::clone(&self.backend),
      cache:   Arc::clone(&self.cache),
      reader:  Arc::clone(&self.reader),
      config:  Arc::clone(&self.config),
    }
  }
}

impl<B: Backend> AppState<B> {
  /// Fresh state with an empty comparison cache.
  pub fn new(backend: B, reader: DocumentReader, config: ServerConfig) -> Self {
    Self {
      backend: Arc::new(backend),
      cache:   Arc::new(ComparisonCache::new()),
      reader:  Arc::new(reader),
      config:  Arc::new(config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] for the Sakshya API.
pub fn router<B: Backend>(state: AppState<B>) -> Router {
  let upload_limit = state.config.max_upload_bytes;
  Router::new()
    .route("/", get(health::handler))
    .route("/analyze", post(analyze::handler::<B>))
    .route(
      "/upload-document",
      post(upload::handler::<B>).layer(DefaultBodyLimit::max(upload_limit)),
    )
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
