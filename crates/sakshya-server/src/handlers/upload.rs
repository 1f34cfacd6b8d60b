//! `POST /upload-document`: turn a PDF or image into statement text.

use axum::{
  Json,
  extract::{Multipart, State},
};
use bytes::Bytes;
use sakshya_core::{
  event::StatementType,
  language::{DetectionConfidence, Language},
};
use sakshya_ocr::Confidence;
use serde::Serialize;
use tracing::{debug, info};

use crate::{AppState, Backend, error::Error};

#[derive(Debug, Serialize)]
pub struct UploadResponse {
  pub filename:             String,
  pub message:              String,
  pub content_preview:      String,
  pub method:               String,
  pub confidence:           Confidence,
  pub detected_language:    Language,
  pub detection_confidence: DetectionConfidence,
  pub disclaimer:           &'static str,
}

fn bad_multipart(e: axum::extract::multipart::MultipartError) -> Error {
  Error::BadRequest(format!("malformed multipart body: {}", e.body_text()))
}

pub async fn handler<B: Backend>(
  State(state): State<AppState<B>>,
  mut multipart: Multipart,
) -> Result<Json<UploadResponse>, Error> {
  let mut file: Option<(String, Bytes)> = None;
  let mut statement_type = None;

  while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
    let name = field.name().unwrap_or_default().to_string();
    match name.as_str() {
      "file" => {
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(bad_multipart)?;
        file = Some((filename, bytes));
      }
      "statement_type" => {
        let raw = field.text().await.map_err(bad_multipart)?;
        let parsed = raw
          .parse::<StatementType>()
          .map_err(|e| Error::BadRequest(e.to_string()))?;
        statement_type = Some(parsed);
      }
      _ => {}
    }
  }

  let (filename, bytes) =
    file.ok_or_else(|| Error::BadRequest("missing multipart field `file`".to_string()))?;
  info!(
    %filename,
    bytes = bytes.len(),
    statement_type = ?statement_type,
    "document uploaded"
  );

  let doc = state.reader.read(bytes, &filename).await?;
  debug!(method = %doc.method, chars = doc.text.len(), "document read");

  Ok(Json(UploadResponse {
    message: format!("Extracted {} characters from {filename}", doc.text.chars().count()),
    filename,
    content_preview: doc.text,
    method: doc.method,
    confidence: doc.confidence,
    detected_language: doc.detected_language,
    detection_confidence: doc.detection_confidence,
    disclaimer: doc.disclaimer,
  }))
}
