//! `POST /analyze`: confront two statements.

use axum::{Json, extract::State};
use sakshya_core::{
  pipeline::{AnalysisRequest, analyze},
  report::AnalysisReport,
};

use crate::{AppState, Backend};

/// Malformed bodies and unknown statement types are rejected by the `Json`
/// extractor before this runs. The pipeline itself never fails.
pub async fn handler<B: Backend>(
  State(state): State<AppState<B>>,
  Json(request): Json<AnalysisRequest>,
) -> Json<AnalysisReport> {
  Json(analyze(state.backend.as_ref(), &state.cache, request).await)
}
