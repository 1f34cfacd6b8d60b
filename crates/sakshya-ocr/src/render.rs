//! Rendering scanned PDF pages to rasters for the OCR engines.

use bytes::Bytes;

use crate::Result;

/// Only the leading pages of a scanned PDF are read.
pub const MAX_PAGES: usize = 3;
pub const RENDER_DPI: f32 = 150.0;

#[derive(Debug, Clone)]
pub enum Rasterizer {
  /// Binds the pdfium library at `library_path`, or `./` and then the
  /// system library when unset.
  #[cfg(feature = "pdfium")]
  Pdfium { library_path: Option<String> },
  /// Hands back pre-rendered PNG pages.
  #[cfg(test)]
  Fixed(Vec<Bytes>),
}

impl Rasterizer {
  /// Fitted PNG pages, at most [`MAX_PAGES`] of them.
  #[cfg_attr(not(any(feature = "pdfium", test)), allow(unused_variables, unreachable_code))]
  pub async fn render(&self, pdf: Bytes) -> Result<Vec<Bytes>> {
    let mut pages: Vec<Bytes> = match *self {
      #[cfg(feature = "pdfium")]
      Rasterizer::Pdfium { ref library_path } => {
        let library_path = library_path.clone();
        tokio::task::spawn_blocking(move || pdfium::render_pages(&pdf, library_path.as_deref()))
          .await??
      }
      #[cfg(test)]
      Rasterizer::Fixed(ref pages) => pages.clone(),
    };
    pages.truncate(MAX_PAGES);
    Ok(pages)
  }
}

#[cfg(feature = "pdfium")]
mod pdfium {
  use bytes::Bytes;
  use pdfium_render::prelude::*;

  use super::{MAX_PAGES, RENDER_DPI};
  use crate::{Error, Result, raster};

  fn bind(library_path: Option<&str>) -> Result<Pdfium> {
    let bindings = match library_path {
      Some(path) => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(path)),
      None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library()),
    }
    .map_err(|e| Error::EngineUnavailable(format!("failed to bind pdfium: {e}")))?;
    Ok(Pdfium::new(bindings))
  }

  pub fn render_pages(pdf: &[u8], library_path: Option<&str>) -> Result<Vec<Bytes>> {
    let pdfium = bind(library_path)?;
    let document = pdfium
      .load_pdf_from_byte_slice(pdf, None)
      .map_err(|e| Error::Pdf(e.to_string()))?;

    let scale = RENDER_DPI / 72.0;
    let mut pages = Vec::new();
    for (idx, page) in document.pages().iter().take(MAX_PAGES).enumerate() {
      let width = (page.width().value * scale) as i32;
      let height = (page.height().value * scale) as i32;
      let bitmap = page
        .render_with_config(
          &PdfRenderConfig::new()
            .set_target_width(width)
            .set_target_height(height),
        )
        .map_err(|e| Error::Pdf(format!("page {}: {e}", idx + 1)))?;
      pages.push(raster::encode_png(&raster::fit(bitmap.as_image()))?);
    }
    tracing::debug!(pages = pages.len(), "rendered scanned PDF");
    Ok(pages)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn page_count_is_capped() {
    let page = Bytes::from_static(b"page");
    let r = Rasterizer::Fixed(vec![page; 5]);
    assert_eq!(r.render(Bytes::new()).await.unwrap().len(), MAX_PAGES);
  }
}
