//! Report types: the shape of an analysis response.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::{comparison::Classification, language::Language};

pub const DISCLAIMER: &str = "This report is generated by an AI-assisted \
  decision-support tool. It does not constitute legal advice. Every finding \
  must be verified against the original statements by a qualified legal \
  professional before it is relied upon.";

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  AsRefStr,
)]
pub enum Severity {
  Minor,
  Material,
  Critical,
}

/// One row of the confrontation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
  pub id:                   String,
  pub source_1:             String,
  pub source_2:             String,
  pub classification:       Classification,
  pub severity:             Severity,
  pub legal_basis:          String,
  /// `[sentence from statement 1, sentence from statement 2]`.
  pub source_sentence_refs: Vec<String>,
}

/// Counters over one run of the pair loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisStats {
  pub events_1:         usize,
  pub events_2:         usize,
  /// Every cross-statement pair, `events_1 * events_2`.
  pub pairs_considered: usize,
  /// Pairs that passed the filter.
  pub pairs_compared:   usize,
  /// Compared pairs answered from the cache.
  pub cache_hits:       usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
  pub rows:              Vec<ReportRow>,
  pub disclaimer:        String,
  pub input_language:    Language,
  pub analysis_language: Language,
  pub stats:             AnalysisStats,
}
