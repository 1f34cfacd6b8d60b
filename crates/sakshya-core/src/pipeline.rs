//! The analysis pipeline: ingest, extract, filter, classify, assess, report.
//!
//! Every collaborator failure is absorbed here. Extraction failures yield no
//! events, classification failures yield a `consistent` verdict (which never
//! reaches the report), and translation failures pass the text through.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use tracing::{debug, info, warn};

use crate::{
  cache::ComparisonCache,
  comparison::{Classification, ComparisonResult},
  event::{Event, StatementType},
  filter::should_compare_events,
  heuristics::apply_legal_heuristics,
  ingest::clean_text,
  language::{Language, detect_language},
  report::{AnalysisReport, AnalysisStats, DISCLAIMER, ReportRow},
  services::{EventExtractor, PairClassifier, Translator},
};

/// Everything a caller supplies for one confrontation.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
  pub statement_1_text: String,
  pub statement_1_type: StatementType,
  pub statement_2_text: String,
  pub statement_2_type: StatementType,
  /// Language for the report's prose. English when absent or unsupported.
  #[serde(default, deserialize_with = "supported_language")]
  pub output_language:  Option<Language>,
}

/// Unknown language codes fall back to `None` instead of rejecting the
/// request.
fn supported_language<'de, D>(deserializer: D) -> Result<Option<Language>, D::Error>
where
  D: Deserializer<'de>,
{
  let code = Option::<String>::deserialize(deserializer)?;
  Ok(code.and_then(|code| match code.parse::<Language>() {
    Ok(lang) => Some(lang),
    Err(e) => {
      warn!(error = %e, "ignoring output language; reporting in English");
      None
    }
  }))
}

/// Run a full analysis. Never fails; see the module docs.
pub async fn analyze<B>(
  backend: &B,
  cache: &ComparisonCache,
  request: AnalysisRequest,
) -> AnalysisReport
where
  B: EventExtractor + PairClassifier + Translator,
{
  info!(
    statement_1 = %request.statement_1_type,
    statement_2 = %request.statement_2_type,
    "analysing statements"
  );

  let (text1, lang1) = prepare_statement(backend, &request.statement_1_text).await;
  let (text2, lang2) = prepare_statement(backend, &request.statement_2_text).await;
  let input_language = [lang1, lang2]
    .into_iter()
    .find(|l| *l != Language::En)
    .unwrap_or(Language::En);

  let events1 = extract_or_empty(backend, &text1, request.statement_1_type).await;
  let events2 = extract_or_empty(backend, &text2, request.statement_2_type).await;
  info!(
    events_1 = events1.len(),
    events_2 = events2.len(),
    "extracted events"
  );

  let mut stats = AnalysisStats {
    events_1: events1.len(),
    events_2: events2.len(),
    pairs_considered: events1.len() * events2.len(),
    ..Default::default()
  };

  let mut rows = Vec::new();
  for e1 in &events1 {
    for e2 in &events2 {
      if !should_compare_events(e1, e2) {
        debug!(event_1 = %e1.event_id, event_2 = %e2.event_id, "pair filtered out");
        continue;
      }
      stats.pairs_compared += 1;

      let comparison = match cache.get(e1, e2) {
        Some(hit) => {
          stats.cache_hits += 1;
          hit
        }
        None => classify_or_consistent(backend, cache, e1, e2).await,
      };

      let row = apply_legal_heuristics(&comparison, e1, e2);
      if row.classification != Classification::Consistent {
        rows.push(row);
      }
    }
  }
  info!(
    discrepancies = rows.len(),
    compared = stats.pairs_compared,
    cache_hits = stats.cache_hits,
    "comparison complete"
  );

  let analysis_language = request.output_language.unwrap_or(Language::En);
  let disclaimer = if analysis_language == Language::En {
    DISCLAIMER.to_string()
  } else {
    localise_rows(backend, &mut rows, analysis_language).await;
    translate_or_passthrough(backend, DISCLAIMER, Language::En, analysis_language)
      .await
  };

  AnalysisReport {
    rows,
    disclaimer,
    input_language,
    analysis_language,
    stats,
  }
}

/// Clean a statement and bring it into English if it is not already.
async fn prepare_statement<T: Translator>(
  translator: &T,
  raw: &str,
) -> (String, Language) {
  let cleaned = clean_text(raw);
  let lang = detect_language(&cleaned);
  if lang == Language::En {
    return (cleaned, lang);
  }
  info!(language = %lang, "translating statement to English");
  let english = translate_or_passthrough(translator, &cleaned, lang, Language::En).await;
  (clean_text(&english), lang)
}

async fn extract_or_empty<E: EventExtractor>(
  extractor: &E,
  text: &str,
  statement_type: StatementType,
) -> Vec<Event> {
  if text.is_empty() {
    return Vec::new();
  }
  match extractor.extract(text, statement_type).await {
    Ok(events) => events,
    Err(e) => {
      warn!(%statement_type, error = %e, "event extraction failed; continuing with no events");
      Vec::new()
    }
  }
}

/// Classify a pair, caching only genuine verdicts.
async fn classify_or_consistent<C: PairClassifier>(
  classifier: &C,
  cache: &ComparisonCache,
  e1: &Event,
  e2: &Event,
) -> ComparisonResult {
  match classifier.classify(e1, e2).await {
    Ok(result) => {
      cache.insert(e1, e2, result.clone());
      result
    }
    Err(e) => {
      warn!(
        event_1 = %e1.event_id,
        event_2 = %e2.event_id,
        error = %e,
        "classification failed; treating pair as consistent"
      );
      ComparisonResult::fallback(e1, e2, e)
    }
  }
}

/// Translate, or hand back the input when there is nothing to do or the
/// translator fails.
pub async fn translate_or_passthrough<T: Translator>(
  translator: &T,
  text: &str,
  from: Language,
  to: Language,
) -> String {
  if from == to || text.trim().is_empty() {
    return text.to_string();
  }
  match translator.translate(text, from, to).await {
    Ok(translated) => translated,
    Err(e) => {
      warn!(%from, %to, error = %e, "translation failed; keeping original text");
      text.to_string()
    }
  }
}

/// Translate each row's legal basis. Citations repeat across rows, so each
/// distinct string is translated once.
async fn localise_rows<T: Translator>(
  translator: &T,
  rows: &mut [ReportRow],
  to: Language,
) {
  let mut done: HashMap<String, String> = HashMap::new();
  for row in rows.iter_mut() {
    if let Some(hit) = done.get(&row.legal_basis) {
      row.legal_basis = hit.clone();
      continue;
    }
    let translated =
      translate_or_passthrough(translator, &row.legal_basis, Language::En, to).await;
    done.insert(row.legal_basis.clone(), translated.clone());
    row.legal_basis = translated;
  }
}
