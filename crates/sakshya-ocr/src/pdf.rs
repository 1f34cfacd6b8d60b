use bytes::Bytes;

use crate::{Error, Result};

/// Minimum trimmed length for typed PDF text to be used as-is.
pub const TYPED_TEXT_MIN: usize = 50;

/// Extracts the embedded text layer of a PDF on the blocking pool.
pub async fn typed_text(bytes: Bytes) -> Result<String> {
  tokio::task::spawn_blocking(move || {
    pdf_extract::extract_text_from_mem(&bytes).map_err(|e| Error::Pdf(e.to_string()))
  })
  .await?
}

/// Whether the text layer has enough content to skip OCR.
pub fn is_typed(text: &str) -> bool { text.trim().chars().count() > TYPED_TEXT_MIN }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn typed_threshold() {
    assert!(!is_typed(&format!("  {}  ", "x".repeat(50))));
    assert!(is_typed(&"x".repeat(51)));
  }

  #[tokio::test]
  async fn garbage_is_an_error() {
    assert!(typed_text(Bytes::from_static(b"%PDF-garbage")).await.is_err());
  }
}
