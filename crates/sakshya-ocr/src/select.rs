//! Text-quality scoring and the engine-arbitration rules.

use sakshya_core::language::{Language, detect_language, invalid_char_ratio, script_coverage};

use crate::engine::Recognition;

/// A primary result below this confidence is retried with the fallback.
pub const WEAK_CONFIDENCE: f64 = 0.35;
/// A primary result with fewer trimmed characters is retried.
pub const WEAK_LEN: usize = 20;
/// When both results are this short the last-resort engine runs.
pub const EMPTY_LEN: usize = 10;
/// How much better the fallback must score to replace the primary.
pub const FALLBACK_MARGIN: f64 = 1.5;

fn trimmed_len(text: &str) -> usize { text.trim().chars().count() }

/// `length × (1 − invalid ratio) + script coverage × 50`, in the script of
/// the detected language.
pub fn score_text(text: &str) -> f64 {
  let len = text.chars().count();
  if len == 0 {
    return 0.0;
  }
  let lang = detect_language(text);
  len as f64 * (1.0 - invalid_char_ratio(text)) + script_coverage(text, lang) * 50.0
}

/// Empty, very short, or low-confidence.
pub fn is_weak(primary: &Recognition) -> bool {
  primary.text.is_empty()
    || trimmed_len(&primary.text) < WEAK_LEN
    || primary.confidence < WEAK_CONFIDENCE
}

pub fn fallback_wins(primary: &Recognition, fallback: &Recognition) -> bool {
  !fallback.text.is_empty()
    && score_text(&fallback.text) > score_text(&primary.text) * FALLBACK_MARGIN
}

pub fn needs_last_resort(primary: &Recognition, fallback: Option<&Recognition>) -> bool {
  trimmed_len(&primary.text) < EMPTY_LEN
    && fallback.is_none_or(|f| trimmed_len(&f.text) < EMPTY_LEN)
}

pub fn last_resort_wins(
  last: &Recognition,
  primary: &Recognition,
  fallback: Option<&Recognition>,
) -> bool {
  let len = trimmed_len(&last.text);
  len > trimmed_len(&primary.text) && fallback.is_none_or(|f| len > trimmed_len(&f.text))
}

/// Language hint for the last-resort engine, taken from whatever the earlier
/// engines managed to read.
pub fn hint_from(primary: &Recognition, fallback: Option<&Recognition>) -> Language {
  let seed = if !primary.text.is_empty() {
    primary.text.as_str()
  } else {
    fallback.map(|f| f.text.as_str()).unwrap_or("")
  };
  detect_language(seed)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rec(text: &str, confidence: f64) -> Recognition {
    Recognition { text: text.to_string(), confidence }
  }

  #[test]
  fn weakness() {
    assert!(is_weak(&rec("", 0.9)));
    assert!(is_weak(&rec("   short text here   ", 0.9)));
    assert!(is_weak(&rec("a perfectly long line of recognised text", 0.2)));
    assert!(!is_weak(&rec("a perfectly long line of recognised text", 0.5)));
  }

  #[test]
  fn scoring_prefers_clean_text() {
    assert_eq!(score_text(""), 0.0);
    let clean = score_text("The accused arrived at nine.");
    let noisy = score_text("The\u{0001}\u{0002}\u{0003}\u{0004}");
    assert!(clean > noisy);
  }

  #[test]
  fn fallback_needs_a_clear_margin() {
    let primary = rec("blurred words", 0.2);
    assert!(!fallback_wins(&primary, &rec("blurred words.", 0.6)));
    assert!(fallback_wins(
      &primary,
      &rec("The accused was standing near the tea stall at nine in the evening.", 0.6)
    ));
    assert!(!fallback_wins(&rec("", 0.0), &rec("", 0.0)));
  }

  #[test]
  fn last_resort_rules() {
    let empty = rec(" ", 0.0);
    assert!(needs_last_resort(&empty, None));
    assert!(needs_last_resort(&empty, Some(&rec("abc", 0.1))));
    assert!(!needs_last_resort(&empty, Some(&rec("a full sentence", 0.1))));

    let last = rec("recovered text", 0.3);
    assert!(last_resort_wins(&last, &empty, Some(&rec("abc", 0.1))));
    assert!(!last_resort_wins(&rec("ab", 0.3), &rec("abc", 0.1), None));
  }

  #[test]
  fn hint_uses_first_nonempty_text() {
    assert_eq!(hint_from(&rec("", 0.0), None), Language::En);
    assert_eq!(
      hint_from(&rec("", 0.0), Some(&rec("आरोपी घटना स्थल पर मौजूद था", 0.1))),
      Language::Hi
    );
  }
}
