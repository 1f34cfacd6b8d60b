//! Document-to-text extraction for uploaded statements.
//!
//! Typed PDFs are read from their text layer. Photographs, and scanned PDFs
//! once a [`Rasterizer`] has rendered their leading pages, go through an
//! ordered list of OCR [`Engine`]s page by page, with the arbitration rules
//! in [`select`] deciding which engine's reading is kept.

mod engine;
mod error;
mod format;
mod pdf;
mod raster;
mod remote;
mod render;
pub mod select;
#[cfg(feature = "tesseract")]
mod tesseract;

use std::time::Duration;

use bytes::Bytes;
use sakshya_core::language::{DetectionConfidence, Language, detect_with_confidence};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub use self::{
  engine::{Engine, Page, PageKind, Recognition},
  error::{Error, Result},
  format::DocumentFormat,
  remote::RemoteOcr,
  render::{MAX_PAGES, RENDER_DPI, Rasterizer},
};
#[cfg(feature = "tesseract")]
pub use self::tesseract::TesseractOcr;

pub const PDF_TEXT_DISCLAIMER: &str =
  "This text is machine-extracted and may contain inaccuracies. Please verify before analysis.";
pub const OCR_DISCLAIMER: &str = "OCR text may contain inaccuracies, especially for handwritten or \
                                  regional-language documents. Please verify before analysis.";

fn default_timeout_secs() -> u64 { 120 }
fn default_tesseract_languages() -> String { "eng".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
  /// Endpoint of the HTTP OCR service. Unset disables the remote engine.
  #[serde(default)]
  pub remote_url:          Option<String>,
  #[serde(default)]
  pub remote_api_key:      Option<String>,
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs:        u64,
  /// Enables the local engine. Ignored unless built with `tesseract`.
  #[serde(default)]
  pub tesseract:           bool,
  #[serde(default = "default_tesseract_languages")]
  pub tesseract_languages: String,
  #[serde(default)]
  pub tesseract_data_path: Option<String>,
  /// Directory holding the pdfium shared library. Ignored unless built
  /// with `pdfium`.
  #[serde(default)]
  pub pdfium_library_path: Option<String>,
}

impl Default for OcrConfig {
  fn default() -> Self {
    Self {
      remote_url:          None,
      remote_api_key:      None,
      timeout_secs:        default_timeout_secs(),
      tesseract:           false,
      tesseract_languages: default_tesseract_languages(),
      tesseract_data_path: None,
      pdfium_library_path: None,
    }
  }
}

/// Coarse label for averaged engine confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
  High,
  Medium,
  Low,
}

impl Confidence {
  pub fn from_score(score: f64) -> Self {
    if score >= 0.7 {
      Self::High
    } else if score >= 0.35 {
      Self::Medium
    } else {
      Self::Low
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractedDocument {
  pub text:                 String,
  pub method:               String,
  pub confidence:           Confidence,
  pub detected_language:    Language,
  pub detection_confidence: DetectionConfidence,
  pub disclaimer:           &'static str,
}

impl ExtractedDocument {
  fn new(text: String, method: String, confidence: Confidence, disclaimer: &'static str) -> Self {
    let (detected_language, detection_confidence) = detect_with_confidence(&text);
    Self {
      text,
      method,
      confidence,
      detected_language,
      detection_confidence,
      disclaimer,
    }
  }
}

/// Turns uploaded bytes into statement text.
#[derive(Debug, Clone, Default)]
pub struct DocumentReader {
  /// Primary, fallback, last resort.
  engines:    Vec<Engine>,
  rasterizer: Option<Rasterizer>,
}

impl DocumentReader {
  pub fn new(engines: Vec<Engine>) -> Self { Self { engines, rasterizer: None } }

  pub fn with_rasterizer(mut self, rasterizer: Rasterizer) -> Self {
    self.rasterizer = Some(rasterizer);
    self
  }

  pub fn from_config(config: &OcrConfig) -> Result<Self> {
    let mut engines = Vec::new();

    if let Some(url) = config.remote_url.as_deref().filter(|u| !u.trim().is_empty()) {
      let remote = RemoteOcr::new(
        url.to_string(),
        config.remote_api_key.clone(),
        Duration::from_secs(config.timeout_secs),
      )?;
      engines.push(Engine::Remote(remote));
    }

    #[cfg(feature = "tesseract")]
    {
      if config.tesseract {
        engines.push(Engine::Tesseract(TesseractOcr::new(
          config.tesseract_data_path.clone(),
          config.tesseract_languages.clone(),
        )));
      }
    }
    #[cfg(not(feature = "tesseract"))]
    {
      if config.tesseract {
        warn!("ocr.tesseract is set but this build lacks the `tesseract` feature");
      }
    }

    #[cfg(feature = "pdfium")]
    let rasterizer = Some(Rasterizer::Pdfium {
      library_path: config.pdfium_library_path.clone(),
    });
    #[cfg(not(feature = "pdfium"))]
    let rasterizer = None;

    if engines.is_empty() {
      warn!("no OCR engine configured; only typed PDFs can be read");
    } else {
      let names: Vec<_> = engines.iter().map(Engine::name).collect();
      info!(engines = ?names, rasterizer = rasterizer.is_some(), "OCR engines ready");
    }
    Ok(Self { engines, rasterizer })
  }

  pub fn has_engines(&self) -> bool { !self.engines.is_empty() }

  pub async fn read(&self, bytes: Bytes, filename: &str) -> Result<ExtractedDocument> {
    let format = DocumentFormat::from_filename(filename)?;

    if format.is_image() {
      if !self.has_engines() {
        return Err(Error::EngineUnavailable(
          "no OCR engine is configured for image uploads".to_string(),
        ));
      }
      let page = Page {
        kind:  PageKind::Png,
        bytes: raster::normalise_blocking(bytes).await?,
      };
      return Ok(combine(&[self.recognize_page(&page).await]));
    }

    match pdf::typed_text(bytes.clone()).await {
      Ok(text) if pdf::is_typed(&text) => {
        let text = text.trim().to_string();
        debug!(chars = text.len(), "using typed PDF text");
        return Ok(ExtractedDocument::new(
          text,
          "pdf_text".to_string(),
          Confidence::High,
          PDF_TEXT_DISCLAIMER,
        ));
      }
      Ok(_) => debug!("PDF has no usable text layer"),
      Err(e) => warn!(error = %e, "typed PDF extraction failed"),
    }
    self.read_scanned(bytes).await
  }

  /// Renders the leading pages and reads each one. A PDF that cannot be
  /// rendered goes whole to an engine that accepts PDF input, if any.
  async fn read_scanned(&self, bytes: Bytes) -> Result<ExtractedDocument> {
    let whole_pdf_engine = self.engines.iter().any(Engine::accepts_pdf);

    if let Some(rasterizer) = self.rasterizer.as_ref().filter(|_| self.has_engines()) {
      match rasterizer.render(bytes.clone()).await {
        Ok(rendered) => {
          debug!(pages = rendered.len(), "reading rendered PDF pages");
          let mut pages = Vec::with_capacity(rendered.len());
          for bytes in rendered {
            let page = Page { kind: PageKind::Png, bytes };
            pages.push(self.recognize_page(&page).await);
          }
          return Ok(combine(&pages));
        }
        Err(e) if whole_pdf_engine => {
          warn!(error = %e, "PDF rendering failed; sending the whole document");
        }
        Err(e) => return Err(e),
      }
    }

    if !whole_pdf_engine {
      return Err(Error::EngineUnavailable(
        "scanned PDFs need a PDF renderer or an OCR engine that accepts PDF input".to_string(),
      ));
    }
    let page = Page { kind: PageKind::Pdf, bytes };
    Ok(combine(&[self.recognize_page(&page).await]))
  }

  async fn run(&self, engine: &Engine, page: &Page, hint: Option<Language>) -> Recognition {
    match engine.recognize(page, hint).await {
      Ok(r) => {
        debug!(
          engine = engine.name(),
          chars = r.text.len(),
          confidence = r.confidence,
          "page recognised"
        );
        r
      }
      Err(e) => {
        warn!(engine = engine.name(), error = %e, "OCR engine failed on page");
        Recognition::empty()
      }
    }
  }

  /// Runs primary, then fallback and last resort as the arbitration rules
  /// demand. Returns the kept reading and its method label.
  async fn recognize_page(&self, page: &Page) -> (Recognition, String) {
    let candidates: Vec<&Engine> = self
      .engines
      .iter()
      .filter(|e| page.kind == PageKind::Png || e.accepts_pdf())
      .collect();
    let Some(primary_engine) = candidates.first().copied() else {
      return (Recognition::empty(), "none".to_string());
    };

    let primary = self.run(primary_engine, page, None).await;
    let mut best = primary.clone();
    let mut method = primary_engine.name().to_string();

    let mut fallback = None;
    if select::is_weak(&primary) {
      if let Some(engine) = candidates.get(1).copied() {
        let reading = self.run(engine, page, None).await;
        if select::fallback_wins(&primary, &reading) {
          best = reading.clone();
          method = format!("{}_fallback", engine.name());
        }
        fallback = Some(reading);
      }
    }

    if candidates.len() > 1 && select::needs_last_resort(&primary, fallback.as_ref()) {
      let engine = candidates.get(2).or(candidates.last()).copied().unwrap_or(primary_engine);
      let hint = select::hint_from(&primary, fallback.as_ref());
      let reading = self.run(engine, page, Some(hint)).await;
      if select::last_resort_wins(&reading, &primary, fallback.as_ref()) {
        best = reading;
        method = format!("{}_fallback", engine.name());
      }
    }

    (best, method)
  }
}

/// Joins page texts with a blank line and averages their confidences.
fn combine(pages: &[(Recognition, String)]) -> ExtractedDocument {
  let text = pages
    .iter()
    .map(|(r, _)| r.text.trim())
    .filter(|t| !t.is_empty())
    .collect::<Vec<_>>()
    .join("\n\n");

  let avg = if pages.is_empty() {
    0.0
  } else {
    pages.iter().map(|(r, _)| r.confidence).sum::<f64>() / pages.len() as f64
  };

  let mut methods: Vec<&str> = Vec::new();
  for (_, m) in pages {
    if !methods.contains(&m.as_str()) {
      methods.push(m);
    }
  }

  ExtractedDocument::new(text, methods.join("+"), Confidence::from_score(avg), OCR_DISCLAIMER)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::engine::tests::{Scripted, rec};

  const SENTENCE: &str = "The accused was standing near the tea stall at nine in the evening.";

  fn reader(engines: &[&Scripted]) -> DocumentReader {
    DocumentReader::new(engines.iter().map(|s| Engine::Scripted((*s).clone())).collect())
  }

  fn png() -> Bytes { Bytes::from(raster::tests::png(40, 20)) }

  #[test]
  fn confidence_labels() {
    assert_eq!(Confidence::from_score(0.7), Confidence::High);
    assert_eq!(Confidence::from_score(0.35), Confidence::Medium);
    assert_eq!(Confidence::from_score(0.34), Confidence::Low);
  }

  #[test]
  fn config_defaults() {
    let cfg = OcrConfig::default();
    assert!(cfg.remote_url.is_none());
    assert_eq!(cfg.timeout_secs, 120);
    assert!(!DocumentReader::from_config(&cfg).unwrap().has_engines());
  }

  #[tokio::test]
  async fn unsupported_format() {
    let r = DocumentReader::default();
    let err = r.read(Bytes::from_static(b"hello"), "notes.docx").await.unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
  }

  #[tokio::test]
  async fn image_without_engines_is_unavailable_before_decoding() {
    let r = DocumentReader::default();
    let err = r.read(Bytes::from_static(b"not a jpeg"), "scan.jpg").await.unwrap_err();
    assert!(matches!(err, Error::EngineUnavailable(_)));
  }

  #[tokio::test]
  async fn strong_primary_skips_fallback() {
    let a = Scripted::new("a", vec![rec(SENTENCE, 0.9)]);
    let b = Scripted::new("b", vec![rec("other", 0.9)]);
    let doc = reader(&[&a, &b]).read(png(), "scan.png").await.unwrap();

    assert_eq!(doc.text, SENTENCE);
    assert_eq!(doc.method, "a");
    assert_eq!(doc.confidence, Confidence::High);
    assert_eq!(doc.detected_language, Language::En);
    assert_eq!(doc.disclaimer, OCR_DISCLAIMER);
    assert_eq!(b.calls(), 0);
  }

  #[tokio::test]
  async fn weak_primary_loses_to_better_fallback() {
    let a = Scripted::new("a", vec![rec("blurred", 0.2)]);
    let b = Scripted::new("b", vec![rec(SENTENCE, 0.6)]);
    let doc = reader(&[&a, &b]).read(png(), "scan.png").await.unwrap();

    assert_eq!(doc.text, SENTENCE);
    assert_eq!(doc.method, "b_fallback");
    assert_eq!(doc.confidence, Confidence::Medium);
  }

  #[tokio::test]
  async fn failing_primary_counts_as_empty() {
    let a = Scripted::new("a", vec![None]);
    let b = Scripted::new("b", vec![rec(SENTENCE, 0.8)]);
    let doc = reader(&[&a, &b]).read(png(), "scan.png").await.unwrap();

    assert_eq!(doc.method, "b_fallback");
    assert_eq!(doc.confidence, Confidence::High);
  }

  #[tokio::test]
  async fn last_resort_runs_when_both_are_empty() {
    let a = Scripted::new("a", vec![rec("", 0.0)]);
    let b = Scripted::new("b", vec![rec("..", 0.0)]);
    let c = Scripted::new("c", vec![rec("recovered witness text", 0.4)]);
    let doc = reader(&[&a, &b, &c]).read(png(), "scan.png").await.unwrap();

    assert_eq!(doc.text, "recovered witness text");
    assert_eq!(doc.method, "c_fallback");
    assert_eq!(doc.confidence, Confidence::Medium);
    assert_eq!(c.calls(), 1);
  }

  #[tokio::test]
  async fn single_engine_never_retries() {
    let a = Scripted::new("a", vec![rec("", 0.0)]);
    let doc = reader(&[&a]).read(png(), "scan.png").await.unwrap();
    assert_eq!(doc.text, "");
    assert_eq!(doc.method, "a");
    assert_eq!(doc.confidence, Confidence::Low);
    assert_eq!(a.calls(), 1);
  }

  #[tokio::test]
  async fn scanned_pdf_needs_a_pdf_engine() {
    let a = Scripted::new("a", vec![rec(SENTENCE, 0.9)]);
    let err = reader(&[&a])
      .read(Bytes::from_static(b"%PDF-1.4 scanned"), "fir.pdf")
      .await
      .unwrap_err();
    assert!(matches!(err, Error::EngineUnavailable(_)));
    assert_eq!(a.calls(), 0);
  }

  #[tokio::test]
  async fn scanned_pdf_goes_whole_to_pdf_engine() {
    let mut remote = Scripted::new("remote", vec![rec(SENTENCE, 0.75)]);
    remote.accepts_pdf = true;
    let local = Scripted::new("local", vec![rec("unused", 0.9)]);
    let doc = reader(&[&local, &remote])
      .read(Bytes::from_static(b"%PDF-1.4 scanned"), "fir.pdf")
      .await
      .unwrap();

    assert_eq!(doc.method, "remote");
    assert_eq!(doc.text, SENTENCE);
    assert_eq!(local.calls(), 0);
  }

  fn rendered(count: usize) -> Rasterizer {
    Rasterizer::Fixed((0..count).map(|_| png()).collect())
  }

  #[tokio::test]
  async fn scanned_pdf_pages_are_rendered_and_read_locally() {
    let a = Scripted::new(
      "a",
      vec![rec(SENTENCE, 0.9), rec("Second page of the statement text.", 0.5)],
    );
    let doc = reader(&[&a])
      .with_rasterizer(rendered(2))
      .read(Bytes::from_static(b"%PDF-1.4 scanned"), "fir.pdf")
      .await
      .unwrap();

    assert_eq!(doc.text, format!("{SENTENCE}\n\nSecond page of the statement text."));
    assert_eq!(doc.method, "a");
    assert_eq!(doc.confidence, Confidence::High);
    assert_eq!(doc.disclaimer, OCR_DISCLAIMER);
    assert_eq!(a.calls(), 2);
  }

  #[tokio::test]
  async fn rendered_pages_are_preferred_over_whole_pdf_engine() {
    let local = Scripted::new("local", vec![rec(SENTENCE, 0.9)]);
    let mut remote = Scripted::new("remote", vec![rec("unused", 0.9)]);
    remote.accepts_pdf = true;
    let doc = reader(&[&local, &remote])
      .with_rasterizer(rendered(1))
      .read(Bytes::from_static(b"%PDF-1.4 scanned"), "fir.pdf")
      .await
      .unwrap();

    assert_eq!(doc.method, "local");
    assert_eq!(remote.calls(), 0);
  }

  #[tokio::test]
  async fn only_leading_pages_are_read() {
    let a = Scripted::new("a", vec![rec(SENTENCE, 0.9)]);
    reader(&[&a])
      .with_rasterizer(rendered(MAX_PAGES + 2))
      .read(Bytes::from_static(b"%PDF-1.4 scanned"), "fir.pdf")
      .await
      .unwrap();
    assert_eq!(a.calls(), MAX_PAGES);
  }

  #[tokio::test]
  async fn rendering_without_engines_is_unavailable() {
    let err = DocumentReader::default()
      .with_rasterizer(rendered(1))
      .read(Bytes::from_static(b"%PDF-1.4 scanned"), "fir.pdf")
      .await
      .unwrap_err();
    assert!(matches!(err, Error::EngineUnavailable(_)));
  }

  #[test]
  fn combine_skips_empty_pages_and_averages() {
    let pages = [
      (Recognition { text: "first".into(), confidence: 0.9 }, "a".to_string()),
      (Recognition::empty(), "a".to_string()),
      (Recognition { text: "third".into(), confidence: 0.6 }, "b_fallback".to_string()),
    ];
    let doc = combine(&pages);
    assert_eq!(doc.text, "first\n\nthird");
    assert_eq!(doc.method, "a+b_fallback");
    assert_eq!(doc.confidence, Confidence::Medium);
  }
}
