//! Legal-severity decision table.
//!
//! Maps a classifier verdict onto a severity and a fixed citation. Rules are
//! checked in order; for contradictions the explanation is scanned for
//! keywords and the first matching group wins.

use crate::{
  comparison::{Classification, ComparisonResult},
  event::{Event, StatementType},
  report::{ReportRow, Severity},
};

pub const FIR_OMISSION: &str = "The FIR is not substantive evidence. It may be \
  used only to corroborate or contradict its maker, and omissions must be \
  assessed cautiously in light of surrounding circumstances.";

pub const SWORN_OMISSION: &str = "Omission of material facts in sworn \
  testimony may amount to a contradiction.";

pub const ROOT_CONTRADICTION: &str = "Contradiction regarding the identity or \
  core role of the accused goes to the root of the prosecution case.";

pub const WEAPON_CONTRADICTION: &str = "Material contradiction regarding the \
  weapon used affects the credibility of the ocular account.";

pub const TIMELINE_CONTRADICTION: &str =
  "Significant discrepancy in the timeline of events.";

pub const GENERAL_CONTRADICTION: &str = "Material contradiction under Section \
  145 of the Bharatiya Sakshya Adhiniyam.";

pub const MINOR_DISCREPANCY: &str = "Minor discrepancies in time or detail are \
  natural in human verification and do not necessarily falsify the testimony \
  (Bharwada Bhoginbhai v. State of Gujarat).";

pub const CORROBORATION: &str = "Corroboration under Section 157 of the \
  Bharatiya Sakshya Adhiniyam.";

/// Severity and citation for one verdict.
pub fn assess(
  classification: Classification,
  explanation: &str,
  type1: StatementType,
  type2: StatementType,
) -> (Severity, &'static str) {
  match classification {
    Classification::Omission => {
      if type1 == StatementType::Fir || type2 == StatementType::Fir {
        (Severity::Minor, FIR_OMISSION)
      } else {
        (Severity::Material, SWORN_OMISSION)
      }
    }
    Classification::Contradiction => {
      let expl = explanation.to_lowercase();
      let mentions = |words: &[&str]| words.iter().any(|w| expl.contains(w));
      if mentions(&["identity", "presence", "role"]) {
        (Severity::Critical, ROOT_CONTRADICTION)
      } else if mentions(&["weapon", "gun", "knife"]) {
        (Severity::Material, WEAPON_CONTRADICTION)
      } else if expl.contains("time") && !expl.contains("minor") {
        (Severity::Material, TIMELINE_CONTRADICTION)
      } else {
        (Severity::Material, GENERAL_CONTRADICTION)
      }
    }
    Classification::MinorDiscrepancy => (Severity::Minor, MINOR_DISCREPANCY),
    Classification::Consistent => (Severity::Minor, CORROBORATION),
  }
}

/// Build the report row for a verdict on `event1` × `event2`.
pub fn apply_legal_heuristics(
  comparison: &ComparisonResult,
  event1: &Event,
  event2: &Event,
) -> ReportRow {
  let (severity, legal_basis) = assess(
    comparison.classification,
    &comparison.explanation,
    event1.statement_type,
    event2.statement_type,
  );
  ReportRow {
    id: format!("{}-{}", comparison.event_1_id, comparison.event_2_id),
    source_1: event1.describe(),
    source_2: event2.describe(),
    classification: comparison.classification,
    severity,
    legal_basis: legal_basis.to_string(),
    source_sentence_refs: vec![
      event1.source_sentence.clone(),
      event2.source_sentence.clone(),
    ],
  }
}
