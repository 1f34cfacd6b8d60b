//! Pairwise classification results.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator as _};

use crate::{Error, event::Event};

/// The relationship between two events as judged by the classifier.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  AsRefStr,
  EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Classification {
  Contradiction,
  Omission,
  /// Also the fail-safe verdict when classification is impossible.
  #[default]
  Consistent,
  MinorDiscrepancy,
}

impl FromStr for Classification {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::iter()
      .find(|c| c.as_ref() == s)
      .ok_or_else(|| Error::UnknownClassification(s.to_string()))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
  pub event_1_id:     String,
  pub event_2_id:     String,
  pub classification: Classification,
  pub explanation:    String,
}

impl ComparisonResult {
  pub fn new(
    event1: &Event,
    event2: &Event,
    classification: Classification,
    explanation: impl Into<String>,
  ) -> Self {
    Self {
      event_1_id: event1.event_id.clone(),
      event_2_id: event2.event_id.clone(),
      classification,
      explanation: explanation.into(),
    }
  }

  /// The conservative verdict returned whenever the classifier fails.
  pub fn fallback(event1: &Event, event2: &Event, cause: impl fmt::Display) -> Self {
    Self::new(
      event1,
      event2,
      Classification::Consistent,
      format!("Error during comparison: {cause}"),
    )
  }

  /// Same verdict, re-addressed to a different pair of events.
  pub fn rebind(&self, event1: &Event, event2: &Event) -> Self {
    Self::new(event1, event2, self.classification, self.explanation.clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn classification_wire_names() {
    assert_eq!(
      serde_json::to_string(&Classification::MinorDiscrepancy).unwrap(),
      "\"minor_discrepancy\""
    );
    assert_eq!(
      "minor_discrepancy".parse::<Classification>().unwrap(),
      Classification::MinorDiscrepancy
    );
    assert!("Contradiction".parse::<Classification>().is_err());
  }
}
