use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
  Pdf,
  Jpeg,
  Png,
}

impl DocumentFormat {
  /// Picks the format from the filename suffix, ignoring case.
  pub fn from_filename(filename: &str) -> Result<Self> {
    let lower = filename.to_lowercase();
    if lower.ends_with(".pdf") {
      Ok(Self::Pdf)
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
      Ok(Self::Jpeg)
    } else if lower.ends_with(".png") {
      Ok(Self::Png)
    } else {
      Err(Error::UnsupportedFormat(filename.to_string()))
    }
  }

  pub fn is_image(self) -> bool { !matches!(self, Self::Pdf) }
}
