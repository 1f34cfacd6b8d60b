//! Collaborator-trait implementations over Gemini.

use sakshya_core::{
  comparison::{Classification, ComparisonResult},
  event::{Event, StatementType},
  language::Language,
  services::{EventExtractor, PairClassifier, Translator},
};
use tracing::{debug, warn};

use crate::{
  Error, Result,
  client::{GeminiClient, GeminiConfig, ResponseFormat},
  parse::{parse_events, parse_verdict},
  prompts::{comparison_prompt, extraction_prompt, translation_prompt},
};

pub const MOCK_EXPLANATION: &str = "Mock consistency check (No API Key)";

/// Extraction, classification and translation over one Gemini model.
#[derive(Debug, Clone)]
pub struct GeminiBackend {
  client: Option<GeminiClient>,
}

impl GeminiBackend {
  /// Build from configuration. A missing or blank API key selects mock mode.
  pub fn from_config(config: &GeminiConfig) -> Result<Self> {
    let key = config
      .api_key
      .as_deref()
      .map(str::trim)
      .filter(|k| !k.is_empty());
    let client = match key {
      Some(k) => Some(GeminiClient::new(k.to_string(), config)?),
      None => {
        warn!("no Gemini API key configured; running in mock mode");
        None
      }
    };
    Ok(Self { client })
  }

  /// A backend that never calls out.
  pub fn mock() -> Self { Self { client: None } }

  pub fn is_mock(&self) -> bool { self.client.is_none() }

  fn client(&self) -> Result<&GeminiClient> {
    self.client.as_ref().ok_or(Error::MissingCredentials)
  }
}

impl EventExtractor for GeminiBackend {
  type Error = Error;

  async fn extract(&self, text: &str, statement_type: StatementType) -> Result<Vec<Event>> {
    let client = self.client()?;
    let preview: String = text.chars().take(50).collect();
    debug!(len = text.len(), %preview, "extracting events");

    let raw = client
      .generate(&extraction_prompt(statement_type, text), ResponseFormat::Json)
      .await?;
    debug!(%raw, "extraction response");

    let events = parse_events(&raw, statement_type)?;
    debug!(count = events.len(), "parsed events");
    Ok(events)
  }
}

impl PairClassifier for GeminiBackend {
  type Error = Error;

  async fn classify(&self, event1: &Event, event2: &Event) -> Result<ComparisonResult> {
    let Some(client) = &self.client else {
      return Ok(ComparisonResult::new(
        event1,
        event2,
        Classification::Consistent,
        MOCK_EXPLANATION,
      ));
    };
    debug!(event_1 = %event1.event_id, event_2 = %event2.event_id, "comparing events");

    let raw = client
      .generate(&comparison_prompt(event1, event2), ResponseFormat::Json)
      .await?;
    debug!(%raw, "comparison response");

    parse_verdict(&raw, event1, event2)
  }
}

impl Translator for GeminiBackend {
  type Error = Error;

  async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String> {
    let client = self.client()?;
    let translated = client
      .generate(&translation_prompt(text, from, to), ResponseFormat::Text)
      .await?;
    Ok(translated.trim().to_string())
  }
}
