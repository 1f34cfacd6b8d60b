//! Events: the atomic factual assertions extracted from a witness statement.
//!
//! An event is immutable once built. Identity is positional: the n-th event
//! extracted from a statement of type `T` is `"T_n"`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator as _};

use crate::Error;

// ─── Statement type ──────────────────────────────────────────────────────────

/// The procedural stage at which a statement was recorded.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  AsRefStr,
  EnumIter,
)]
pub enum StatementType {
  /// First Information Report.
  #[serde(rename = "FIR")]
  #[strum(serialize = "FIR")]
  Fir,
  /// Police examination under Section 161 CrPC / 180 BNSS.
  #[serde(rename = "Section 161")]
  #[strum(serialize = "Section 161")]
  Section161,
  /// Statement recorded before a magistrate under Section 164.
  #[serde(rename = "Section 164")]
  #[strum(serialize = "Section 164")]
  Section164,
  /// Sworn testimony before the trial court.
  #[serde(rename = "Court Deposition")]
  #[strum(serialize = "Court Deposition")]
  CourtDeposition,
}

impl FromStr for StatementType {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::iter()
      .find(|t| t.as_ref() == s)
      .ok_or_else(|| Error::UnknownStatementType(s.to_string()))
  }
}

// ─── Event ───────────────────────────────────────────────────────────────────

/// The fields an extractor supplies for one event, before identity is
/// assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
  pub actor:           String,
  pub action:          String,
  pub target:          Option<String>,
  pub time:            Option<String>,
  pub location:        Option<String>,
  pub source_sentence: String,
}

/// A single factual assertion attributed to a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
  pub event_id:        String,
  pub actor:           String,
  pub action:          String,
  pub target:          Option<String>,
  pub time:            Option<String>,
  pub location:        Option<String>,
  /// The sentence of the statement the event was taken from, verbatim.
  pub source_sentence: String,
  pub statement_type:  StatementType,
}

impl Event {
  /// Assign identity to a draft. `ordinal` is 1-based.
  pub fn from_draft(
    statement_type: StatementType,
    ordinal: usize,
    draft: EventDraft,
  ) -> Self {
    Self {
      event_id: format!("{statement_type}_{ordinal}"),
      actor: draft.actor,
      action: draft.action,
      target: draft.target,
      time: draft.time,
      location: draft.location,
      source_sentence: draft.source_sentence,
      statement_type,
    }
  }

  /// Report-row label, e.g. `"FIR: Accused A assaulted"`.
  pub fn describe(&self) -> String {
    format!("{}: {} {}", self.statement_type, self.actor, self.action)
  }
}

/// Number a batch of drafts in order.
pub fn number_events(
  statement_type: StatementType,
  drafts: impl IntoIterator<Item = EventDraft>,
) -> Vec<Event> {
  drafts
    .into_iter()
    .enumerate()
    .map(|(i, d)| Event::from_draft(statement_type, i + 1, d))
    .collect()
}
