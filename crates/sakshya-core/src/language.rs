//! Supported statement languages and script-based detection.
//!
//! Every supported language other than English is written in its own Unicode
//! block, so the dominant script of a text identifies its language.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator as _};

use crate::Error;

/// Below this many characters (after trimming) detection is not attempted.
pub const MIN_DETECTION_LEN: usize = 10;

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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
  #[default]
  En,
  Hi,
  Ml,
  Ta,
  Te,
  Kn,
  Bn,
}

impl Language {
  /// ISO 639-1 code.
  pub fn code(self) -> &'static str {
    match self {
      Language::En => "en",
      Language::Hi => "hi",
      Language::Ml => "ml",
      Language::Ta => "ta",
      Language::Te => "te",
      Language::Kn => "kn",
      Language::Bn => "bn",
    }
  }

  /// English name, used in translation prompts.
  pub fn name(self) -> &'static str {
    match self {
      Language::En => "English",
      Language::Hi => "Hindi",
      Language::Ml => "Malayalam",
      Language::Ta => "Tamil",
      Language::Te => "Telugu",
      Language::Kn => "Kannada",
      Language::Bn => "Bengali",
    }
  }

  /// Inclusive code-point range of the language's script.
  pub fn script_range(self) -> (char, char) {
    match self {
      Language::En => ('\u{0000}', '\u{007F}'),
      Language::Hi => ('\u{0900}', '\u{097F}'),
      Language::Bn => ('\u{0980}', '\u{09FF}'),
      Language::Ta => ('\u{0B80}', '\u{0BFF}'),
      Language::Te => ('\u{0C00}', '\u{0C7F}'),
      Language::Kn => ('\u{0C80}', '\u{0CFF}'),
      Language::Ml => ('\u{0D00}', '\u{0D7F}'),
    }
  }

  fn owns(self, c: char) -> bool {
    let (lo, hi) = self.script_range();
    (lo..=hi).contains(&c)
  }
}

impl FromStr for Language {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let code = s.trim().to_lowercase();
    Self::iter()
      .find(|l| l.code() == code)
      .ok_or_else(|| Error::UnsupportedLanguage(s.to_string()))
  }
}

// ─── Detection ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionConfidence {
  High,
  Medium,
  Low,
}

impl DetectionConfidence {
  fn from_share(share: f64) -> Self {
    if share > 0.85 {
      Self::High
    } else if share > 0.6 {
      Self::Medium
    } else {
      Self::Low
    }
  }
}

/// Detect the language of `text`, defaulting to English.
pub fn detect_language(text: &str) -> Language { detect_with_confidence(text).0 }

/// Detect the language of `text` along with how dominant its script is.
///
/// ASCII letters vote for English and any code point inside an Indic block
/// votes for that block; digits and punctuation are shared and ignored.
pub fn detect_with_confidence(text: &str) -> (Language, DetectionConfidence) {
  let trimmed = text.trim();
  if trimmed.chars().count() < MIN_DETECTION_LEN {
    return (Language::En, DetectionConfidence::Low);
  }

  let mut counts = [0usize; 7];
  let mut total = 0usize;
  for c in trimmed.chars() {
    let Some(idx) = Language::iter().position(|l| {
      if l == Language::En { c.is_ascii_alphabetic() } else { l.owns(c) }
    }) else {
      continue;
    };
    counts[idx] += 1;
    total += 1;
  }
  if total == 0 {
    return (Language::En, DetectionConfidence::Low);
  }

  let (best, &best_count) = counts
    .iter()
    .enumerate()
    .max_by_key(|(i, n)| (**n, std::cmp::Reverse(*i)))
    .unwrap_or((0, &0));
  let tied = counts.iter().filter(|&&n| n == best_count).count() > 1;
  if tied {
    return (Language::En, DetectionConfidence::Low);
  }

  let lang = Language::iter().nth(best).unwrap_or_default();
  let share = best_count as f64 / total as f64;
  (lang, DetectionConfidence::from_share(share))
}

// ─── Text quality ────────────────────────────────────────────────────────────

/// Fraction of `text` written in `lang`'s script, capped at 1.
pub fn script_coverage(text: &str, lang: Language) -> f64 {
  let len = text.chars().count();
  if len == 0 {
    return 0.0;
  }
  let matches = text.chars().filter(|c| lang.owns(*c)).count();
  (matches as f64 / len as f64).min(1.0)
}

/// Printable in the `str.isprintable` sense: ASCII space is the only
/// printable separator. Control, format, private-use and other whitespace
/// characters (including `\n` and `\t`) are not.
fn is_printable(c: char) -> bool {
  if c == ' ' {
    return true;
  }
  if c.is_control() || c.is_whitespace() {
    return false;
  }
  !matches!(
    c,
    '\u{00AD}'
      | '\u{0600}'..='\u{0605}'
      | '\u{061C}'
      | '\u{06DD}'
      | '\u{070F}'
      | '\u{180E}'
      | '\u{200B}'..='\u{200F}'
      | '\u{202A}'..='\u{202E}'
      | '\u{2060}'..='\u{2064}'
      | '\u{2066}'..='\u{206F}'
      | '\u{FEFF}'
      | '\u{FFF9}'..='\u{FFFB}'
      | '\u{E000}'..='\u{F8FF}'
      | '\u{F0000}'..='\u{10FFFF}'
  )
}

/// `1 - printable / len`. Empty text is entirely invalid.
pub fn invalid_char_ratio(text: &str) -> f64 {
  let len = text.chars().count();
  if len == 0 {
    return 1.0;
  }
  let printable = text.chars().filter(|c| is_printable(*c)).count();
  1.0 - (printable as f64 / len as f64)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn short_text_is_english() {
    assert_eq!(detect_with_confidence("नमस्ते"), (Language::En, DetectionConfidence::Low));
    assert_eq!(detect_language("   "), Language::En);
  }

  #[test]
  fn detects_english() {
    let (lang, conf) = detect_with_confidence("The accused was standing near the gate.");
    assert_eq!(lang, Language::En);
    assert_eq!(conf, DetectionConfidence::High);
  }

  #[test]
  fn detects_indic_scripts() {
    assert_eq!(detect_language("आरोपी घटना स्थल पर मौजूद था।"), Language::Hi);
    assert_eq!(detect_language("പ്രതി സംഭവസ്ഥലത്ത് ഉണ്ടായിരുന്നു"), Language::Ml);
    assert_eq!(detect_language("குற்றவாளி சம்பவ இடத்தில் இருந்தார்"), Language::Ta);
    assert_eq!(detect_language("অভিযুক্ত ঘটনাস্থলে উপস্থিত ছিল"), Language::Bn);
  }

  #[test]
  fn mixed_script_lowers_confidence() {
    let (lang, conf) =
      detect_with_confidence("FIR No 12 आरोपी Ramesh घटना स्थल पर मौजूद था police");
    assert_eq!(lang, Language::Hi);
    assert_ne!(conf, DetectionConfidence::High);
  }

  #[test]
  fn parse_codes() {
    assert_eq!("HI".parse::<Language>().unwrap(), Language::Hi);
    assert!("fr".parse::<Language>().is_err());
    assert_eq!(serde_json::to_string(&Language::Kn).unwrap(), "\"kn\"");
  }

  #[test]
  fn quality_measures() {
    assert_eq!(invalid_char_ratio(""), 1.0);
    assert_eq!(invalid_char_ratio("clean text"), 0.0);
    assert!(invalid_char_ratio("ab\u{0007}\u{000C}") > 0.4);
    assert_eq!(script_coverage("abc", Language::En), 1.0);
    assert_eq!(script_coverage("", Language::Hi), 0.0);
    assert!(script_coverage("ab कख", Language::Hi) > 0.3);
  }

  #[test]
  fn line_breaks_and_separators_are_not_printable() {
    assert!((invalid_char_ratio("ab\ncd") - 0.2).abs() < 1e-9);
    assert_eq!(invalid_char_ratio("a\tb\r"), 0.5);
    assert_eq!(invalid_char_ratio("a\u{00A0}b\u{2028}"), 0.5);
    // Zero-width joiners are format characters.
    assert_eq!(invalid_char_ratio("क\u{200D}ष"), 1.0 - 2.0 / 3.0);
    assert_eq!(invalid_char_ratio("मलयालम தமிழ்"), 0.0);
  }
}
