//! Minimal client for the `generateContent` endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

// ─── Configuration ───────────────────────────────────────────────────────────

/// The `[gemini]` table of the server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
  /// Without a key the backend runs in mock mode.
  #[serde(default)]
  pub api_key:      Option<String>,
  #[serde(default = "default_model")]
  pub model:        String,
  #[serde(default = "default_base_url")]
  pub base_url:     String,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

fn default_model() -> String { "gemini-2.5-flash".to_string() }

fn default_base_url() -> String {
  "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout_secs() -> u64 { 60 }

impl Default for GeminiConfig {
  fn default() -> Self {
    Self {
      api_key:      None,
      model:        default_model(),
      base_url:     default_base_url(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

/// Whether the model is constrained to emit JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
  Json,
  Text,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
  contents:          Vec<Content<'a>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
  role:  &'static str,
  parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
  text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
  response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
  #[serde(default)]
  parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
  text: Option<String>,
}

fn request_body(prompt: &str, format: ResponseFormat) -> GenerateRequest<'_> {
  GenerateRequest {
    contents:          vec![Content {
      role:  "user",
      parts: vec![Part { text: prompt }],
    }],
    generation_config: match format {
      ResponseFormat::Json => Some(GenerationConfig {
        response_mime_type: "application/json",
      }),
      ResponseFormat::Text => None,
    },
  }
}

/// Concatenated text of the first candidate.
fn first_candidate_text(resp: GenerateResponse) -> Result<String> {
  let candidate = resp
    .candidates
    .into_iter()
    .next()
    .and_then(|c| c.content)
    .ok_or(Error::EmptyResponse)?;
  let text: String = candidate.parts.into_iter().filter_map(|p| p.text).collect();
  if text.is_empty() {
    return Err(Error::EmptyResponse);
  }
  Ok(text)
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// An authenticated connection to one Gemini model.
///
/// Cloning is cheap; the inner `reqwest::Client` is reference-counted.
#[derive(Debug, Clone)]
pub struct GeminiClient {
  http:     reqwest::Client,
  api_key:  String,
  endpoint: String,
}

impl GeminiClient {
  pub fn new(api_key: String, config: &GeminiConfig) -> Result<Self> {
    let http = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    let endpoint = format!(
      "{}/v1beta/models/{}:generateContent",
      config.base_url.trim_end_matches('/'),
      config.model
    );
    Ok(Self { http, api_key, endpoint })
  }

  pub fn endpoint(&self) -> &str { &self.endpoint }

  /// Send one single-turn prompt and return the model's text.
  pub async fn generate(&self, prompt: &str, format: ResponseFormat) -> Result<String> {
    debug!(endpoint = %self.endpoint, prompt_len = prompt.len(), "calling Gemini");
    let resp = self
      .http
      .post(&self.endpoint)
      .header("x-goog-api-key", &self.api_key)
      .json(&request_body(prompt, format))
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      return Err(Error::Api { status: status.as_u16(), body });
    }

    let parsed: GenerateResponse = resp.json().await?;
    first_candidate_text(parsed)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn json_request_sets_mime_type() {
    let body = serde_json::to_value(request_body("hello", ResponseFormat::Json)).unwrap();
    assert_eq!(
      body,
      json!({
        "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }],
        "generationConfig": { "responseMimeType": "application/json" }
      })
    );
  }

  #[test]
  fn text_request_omits_generation_config() {
    let body = serde_json::to_value(request_body("hi", ResponseFormat::Text)).unwrap();
    assert!(body.get("generationConfig").is_none());
  }

  #[test]
  fn candidate_parts_are_concatenated() {
    let resp: GenerateResponse = serde_json::from_value(json!({
      "candidates": [
        { "content": { "parts": [{ "text": "{\"events\":" }, { "text": "[]}" }] } },
        { "content": { "parts": [{ "text": "ignored" }] } }
      ]
    }))
    .unwrap();
    assert_eq!(first_candidate_text(resp).unwrap(), "{\"events\":[]}");
  }

  #[test]
  fn missing_candidates_is_empty_response() {
    let resp: GenerateResponse =
      serde_json::from_value(json!({ "promptFeedback": {} })).unwrap();
    assert!(matches!(first_candidate_text(resp), Err(Error::EmptyResponse)));
  }

  #[test]
  fn endpoint_from_config() {
    let config = GeminiConfig {
      base_url: "http://localhost:9999/".into(),
      ..Default::default()
    };
    let client = GeminiClient::new("k".into(), &config).unwrap();
    assert_eq!(
      client.endpoint(),
      "http://localhost:9999/v1beta/models/gemini-2.5-flash:generateContent"
    );
  }
}
