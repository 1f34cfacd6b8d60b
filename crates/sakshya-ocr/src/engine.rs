//! OCR engines and the page type they read.

use bytes::Bytes;
use sakshya_core::language::Language;

use crate::{Result, remote::RemoteOcr};
#[cfg(feature = "tesseract")]
use crate::tesseract::TesseractOcr;

/// What a page's bytes contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
  /// A normalised PNG raster.
  Png,
  /// An entire scanned PDF, for engines that rasterise themselves.
  Pdf,
}

#[derive(Debug, Clone)]
pub struct Page {
  pub kind:  PageKind,
  pub bytes: Bytes,
}

impl Page {
  pub fn file_name(&self) -> &'static str {
    match self.kind {
      PageKind::Png => "page.png",
      PageKind::Pdf => "document.pdf",
    }
  }

  pub fn mime(&self) -> &'static str {
    match self.kind {
      PageKind::Png => "image/png",
      PageKind::Pdf => "application/pdf",
    }
  }
}

/// Text read from one page, with the engine's confidence in `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recognition {
  pub text:       String,
  pub confidence: f64,
}

impl Recognition {
  pub fn empty() -> Self { Self::default() }
}

/// A configured recognition engine.
#[derive(Debug, Clone)]
pub enum Engine {
  Remote(RemoteOcr),
  #[cfg(feature = "tesseract")]
  Tesseract(TesseractOcr),
  /// Replays canned results, one per call (the last one repeats).
  #[cfg(test)]
  Scripted(tests::Scripted),
}

impl Engine {
  /// Short label used in method names (`"remote"`, `"remote_fallback"`).
  pub fn name(&self) -> &'static str {
    match self {
      Engine::Remote(_) => "remote",
      #[cfg(feature = "tesseract")]
      Engine::Tesseract(_) => "tesseract",
      #[cfg(test)]
      Engine::Scripted(s) => s.name,
    }
  }

  pub fn accepts_pdf(&self) -> bool {
    match self {
      Engine::Remote(_) => true,
      #[cfg(feature = "tesseract")]
      Engine::Tesseract(_) => false,
      #[cfg(test)]
      Engine::Scripted(s) => s.accepts_pdf,
    }
  }

  pub async fn recognize(&self, page: &Page, hint: Option<Language>) -> Result<Recognition> {
    match self {
      Engine::Remote(e) => e.recognize(page, hint).await,
      #[cfg(feature = "tesseract")]
      Engine::Tesseract(e) => e.recognize(page, hint).await,
      #[cfg(test)]
      Engine::Scripted(s) => s.replay(),
    }
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
  };

  use super::*;
  use crate::Error;

  #[derive(Debug, Clone)]
  pub struct Scripted {
    pub name:        &'static str,
    pub accepts_pdf: bool,
    pub results:     Arc<Vec<Option<Recognition>>>,
    pub calls:       Arc<AtomicUsize>,
  }

  impl Scripted {
    /// `None` entries simulate an engine failure.
    pub fn new(name: &'static str, results: Vec<Option<Recognition>>) -> Self {
      Self {
        name,
        accepts_pdf: false,
        results: Arc::new(results),
        calls: Arc::new(AtomicUsize::new(0)),
      }
    }

    pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

    pub fn replay(&self) -> Result<Recognition> {
      let i = self.calls.fetch_add(1, Ordering::SeqCst);
      let idx = i.min(self.results.len().saturating_sub(1));
      self
        .results
        .get(idx)
        .cloned()
        .flatten()
        .ok_or_else(|| Error::Engine(format!("{} failed", self.name)))
    }
  }

  pub fn rec(text: &str, confidence: f64) -> Option<Recognition> {
    Some(Recognition { text: text.to_string(), confidence })
  }
}
