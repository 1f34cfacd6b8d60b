//! Image normalisation ahead of recognition.

use std::io::Cursor;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat, imageops::FilterType};

use crate::Result;

/// Longest side, in pixels, of a page sent to an engine.
pub const MAX_DIMENSION: u32 = 1600;

/// Shrinks `img` so its longest side is at most [`MAX_DIMENSION`], keeping
/// the aspect ratio. Smaller images are returned untouched.
pub fn fit(img: DynamicImage) -> DynamicImage {
  if img.width().max(img.height()) <= MAX_DIMENSION {
    return img;
  }
  img.resize(MAX_DIMENSION, MAX_DIMENSION, FilterType::Lanczos3)
}

pub fn encode_png(img: &DynamicImage) -> Result<Bytes> {
  let mut out = Vec::new();
  img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)?;
  Ok(Bytes::from(out))
}

/// Decodes a JPEG or PNG upload and re-encodes it as a fitted PNG.
pub fn normalise(bytes: &[u8]) -> Result<Bytes> {
  encode_png(&fit(image::load_from_memory(bytes)?))
}

/// [`normalise`] on the blocking pool.
pub async fn normalise_blocking(bytes: Bytes) -> Result<Bytes> {
  tokio::task::spawn_blocking(move || normalise(&bytes)).await?
}

#[cfg(test)]
pub(crate) mod tests {
  use image::RgbImage;

  use super::*;

  pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png).unwrap();
    out
  }

  #[test]
  fn large_images_are_fitted() {
    let img = fit(DynamicImage::ImageRgb8(RgbImage::new(3200, 800)));
    assert_eq!((img.width(), img.height()), (1600, 400));

    let tall = fit(DynamicImage::ImageRgb8(RgbImage::new(1000, 4000)));
    assert_eq!((tall.width(), tall.height()), (400, 1600));
  }

  #[test]
  fn small_images_are_untouched() {
    let img = fit(DynamicImage::ImageRgb8(RgbImage::new(640, 480)));
    assert_eq!((img.width(), img.height()), (640, 480));
  }

  #[test]
  fn normalise_outputs_png() {
    let out = normalise(&png(2000, 100)).unwrap();
    let back = image::load_from_memory_with_format(&out, ImageFormat::Png).unwrap();
    assert_eq!(back.width(), 1600);
  }

  #[test]
  fn garbage_is_an_image_error() {
    assert!(matches!(normalise(b"not an image"), Err(crate::Error::Image(_))));
  }
}
