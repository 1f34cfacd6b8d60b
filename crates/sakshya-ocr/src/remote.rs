//! HTTP OCR service client.
//!
//! Protocol: `POST {url}` with a multipart `file` part and an optional
//! `language` text part (ISO 639-1). The service answers
//! `{"text": "...", "confidence": 0.0..1.0}`.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use sakshya_core::language::Language;
use serde::Deserialize;
use tracing::debug;

use crate::{
  Error, Result,
  engine::{Page, Recognition},
};

#[derive(Debug, Deserialize)]
struct RemoteResponse {
  #[serde(default)]
  text:       String,
  #[serde(default)]
  confidence: f64,
}

#[derive(Debug, Clone)]
pub struct RemoteOcr {
  http:    reqwest::Client,
  url:     String,
  api_key: Option<String>,
}

impl RemoteOcr {
  pub fn new(url: String, api_key: Option<String>, timeout: Duration) -> Result<Self> {
    let http = reqwest::Client::builder().timeout(timeout).build()?;
    Ok(Self { http, url, api_key })
  }

  pub async fn recognize(&self, page: &Page, hint: Option<Language>) -> Result<Recognition> {
    let part = Part::bytes(page.bytes.to_vec())
      .file_name(page.file_name())
      .mime_str(page.mime())?;
    let mut form = Form::new().part("file", part);
    if let Some(lang) = hint {
      form = form.text("language", lang.code());
    }

    let mut req = self.http.post(&self.url).multipart(form);
    if let Some(key) = &self.api_key {
      req = req.bearer_auth(key);
    }

    debug!(url = %self.url, bytes = page.bytes.len(), "sending page to OCR service");
    let resp = req.send().await?;
    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      return Err(Error::Remote { status: status.as_u16(), body });
    }

    let parsed: RemoteResponse = resp.json().await?;
    Ok(Recognition {
      text:       parsed.text,
      confidence: parsed.confidence.clamp(0.0, 1.0),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn response_fields_default() {
    let r: RemoteResponse = serde_json::from_str(r#"{"text": "abc"}"#).unwrap();
    assert_eq!(r.text, "abc");
    assert_eq!(r.confidence, 0.0);
  }
}
