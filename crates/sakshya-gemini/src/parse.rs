//! Turning model output into core types.
//!
//! The model is asked for bare JSON but sometimes wraps it in a Markdown
//! code fence; [`strip_code_fences`] removes that before parsing.

use sakshya_core::{
  comparison::{Classification, ComparisonResult},
  event::{Event, EventDraft, StatementType, number_events},
};
use serde::Deserialize;

use crate::Result;

pub const NO_EXPLANATION: &str = "No explanation provided.";

/// Remove a surrounding ```` ```json ```` / ```` ``` ```` fence, if any.
pub fn strip_code_fences(raw: &str) -> &str {
  let mut s = raw.trim();
  if let Some(rest) = s.strip_prefix("```json") {
    s = rest;
  }
  if let Some(rest) = s.strip_prefix("```") {
    s = rest;
  }
  if let Some(rest) = s.strip_suffix("```") {
    s = rest;
  }
  s.trim()
}

// ─── Extraction ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawExtraction {
  #[serde(default)]
  events: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
  actor:           Option<String>,
  action:          Option<String>,
  target:          Option<String>,
  time:            Option<String>,
  location:        Option<String>,
  source_sentence: Option<String>,
}

/// `None` for absent, blank, or spelled-out null values.
fn present(value: Option<String>) -> Option<String> {
  let v = value?;
  let t = v.trim();
  if t.is_empty() || t.eq_ignore_ascii_case("null") || t.eq_ignore_ascii_case("none") {
    None
  } else {
    Some(t.to_string())
  }
}

impl From<RawEvent> for EventDraft {
  fn from(r: RawEvent) -> Self {
    EventDraft {
      actor:           present(r.actor).unwrap_or_else(|| "Unknown".to_string()),
      action:          present(r.action).unwrap_or_else(|| "Unknown".to_string()),
      target:          present(r.target),
      time:            present(r.time),
      location:        present(r.location),
      source_sentence: r.source_sentence.unwrap_or_default(),
    }
  }
}

/// Parse an extraction response. Events are stamped with `statement_type`
/// and numbered in order.
pub fn parse_events(raw: &str, statement_type: StatementType) -> Result<Vec<Event>> {
  let parsed: RawExtraction = serde_json::from_str(strip_code_fences(raw))?;
  Ok(number_events(
    statement_type,
    parsed.events.into_iter().map(EventDraft::from),
  ))
}

// ─── Comparison ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawVerdict {
  classification: Option<String>,
  explanation:    Option<String>,
}

/// Accept `"Minor Discrepancy"` and `"minor-discrepancy"` as well as the
/// canonical snake_case label.
fn normalise_label(label: &str) -> String {
  label.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Parse a comparison response into a verdict on `e1` × `e2`.
pub fn parse_verdict(raw: &str, e1: &Event, e2: &Event) -> Result<ComparisonResult> {
  let parsed: RawVerdict = serde_json::from_str(strip_code_fences(raw))?;
  let classification = match parsed.classification {
    Some(label) => normalise_label(&label).parse::<Classification>()?,
    None => Classification::Consistent,
  };
  let explanation = parsed
    .explanation
    .unwrap_or_else(|| NO_EXPLANATION.to_string());
  Ok(ComparisonResult::new(e1, e2, classification, explanation))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Error;

  fn pair() -> (Event, Event) {
    let draft = |action: &str| EventDraft {
      actor: "A".into(),
      action: action.into(),
      ..Default::default()
    };
    (
      Event::from_draft(StatementType::Fir, 1, draft("hit")),
      Event::from_draft(StatementType::Section161, 2, draft("slapped")),
    )
  }

  #[test]
  fn fences_are_stripped() {
    assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    assert_eq!(strip_code_fences("  ```\n[]```  "), "[]");
    assert_eq!(strip_code_fences("{}"), "{}");
  }

  #[test]
  fn events_get_defaults_and_forced_type() {
    let raw = r#"```json
    {"events": [
      {"actor": "Accused A", "action": "assaulted", "target": "B",
       "time": "null", "location": null, "source_sentence": "A assaulted B."},
      {"action": "fled", "target": " ", "statement_type": "Court Deposition"}
    ]}
    ```"#;
    let events = parse_events(raw, StatementType::Section161).unwrap();
    assert_eq!(events.len(), 2);

    assert_eq!(events[0].event_id, "Section 161_1");
    assert_eq!(events[0].target.as_deref(), Some("B"));
    assert_eq!(events[0].time, None);
    assert_eq!(events[0].location, None);
    assert_eq!(events[0].source_sentence, "A assaulted B.");

    assert_eq!(events[1].event_id, "Section 161_2");
    assert_eq!(events[1].actor, "Unknown");
    assert_eq!(events[1].target, None);
    assert_eq!(events[1].source_sentence, "");
    assert_eq!(events[1].statement_type, StatementType::Section161);
  }

  #[test]
  fn missing_events_key_is_empty() {
    assert!(parse_events("{}", StatementType::Fir).unwrap().is_empty());
  }

  #[test]
  fn malformed_extraction_is_an_error() {
    assert!(matches!(
      parse_events("Sorry, I cannot help.", StatementType::Fir),
      Err(Error::Json(_))
    ));
  }

  #[test]
  fn verdict_labels_and_defaults() {
    let (e1, e2) = pair();
    let v = parse_verdict(
      r#"{"classification": "Minor Discrepancy", "explanation": "time differs"}"#,
      &e1,
      &e2,
    )
    .unwrap();
    assert_eq!(v.classification, Classification::MinorDiscrepancy);
    assert_eq!(v.event_1_id, "FIR_1");
    assert_eq!(v.event_2_id, "Section 161_2");

    let v = parse_verdict("{}", &e1, &e2).unwrap();
    assert_eq!(v.classification, Classification::Consistent);
    assert_eq!(v.explanation, NO_EXPLANATION);
  }

  #[test]
  fn unknown_label_is_an_error() {
    let (e1, e2) = pair();
    assert!(matches!(
      parse_verdict(r#"{"classification": "perjury"}"#, &e1, &e2),
      Err(Error::Core(sakshya_core::Error::UnknownClassification(_)))
    ));
  }
}
