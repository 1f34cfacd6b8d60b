//! Local Tesseract engine (`tesseract` feature).

use sakshya_core::language::Language;

use crate::{
  Error, Result,
  engine::{Page, PageKind, Recognition},
};

/// Tesseract traineddata name for a language.
pub fn tesseract_code(lang: Language) -> &'static str {
  match lang {
    Language::En => "eng",
    Language::Hi => "hin",
    Language::Ml => "mal",
    Language::Ta => "tam",
    Language::Te => "tel",
    Language::Kn => "kan",
    Language::Bn => "ben",
  }
}

#[derive(Debug, Clone)]
pub struct TesseractOcr {
  data_path: Option<String>,
  /// Used when no hint is given, e.g. `"eng+hin"`.
  languages: String,
}

impl TesseractOcr {
  pub fn new(data_path: Option<String>, languages: String) -> Self {
    Self { data_path, languages }
  }

  pub async fn recognize(&self, page: &Page, hint: Option<Language>) -> Result<Recognition> {
    if page.kind == PageKind::Pdf {
      return Err(Error::Engine("tesseract reads rasters only".to_string()));
    }
    let bytes = page.bytes.clone();
    let data_path = self.data_path.clone();
    let lang = hint
      .map(|l| tesseract_code(l).to_string())
      .unwrap_or_else(|| self.languages.clone());

    tokio::task::spawn_blocking(move || {
      let mut lt = leptess::LepTess::new(data_path.as_deref(), &lang)
        .map_err(|e| Error::Engine(format!("tesseract init ({lang}): {e}")))?;
      lt.set_image_from_mem(&bytes)
        .map_err(|e| Error::Engine(format!("tesseract image: {e}")))?;
      let text = lt
        .get_utf8_text()
        .map_err(|e| Error::Engine(format!("tesseract text: {e}")))?;
      let confidence = (f64::from(lt.mean_text_conf()) / 100.0).clamp(0.0, 1.0);
      Ok(Recognition { text, confidence })
    })
    .await?
  }
}
