//! Image encoding: `DynamicImage` → in-memory PNG for the OCR engine.
//!
//! Tesseract ingests encoded image bytes through leptonica, so each
//! preprocessed page is re-encoded once before recognition. PNG is chosen
//! over JPEG because it is lossless — compression artefacts on glyph edges
//! are exactly what the sharpen pass just worked to remove.

use crate::error::StageError;
use image::DynamicImage;
use std::io::Cursor;
use tracing::debug;

/// Encode a preprocessed image as PNG bytes ready for the recognizer.
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>, StageError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| StageError::ImageEncode(e.to_string()))?;

    debug!("encoded image → {} bytes PNG", buf.len());
    Ok(buf)
}
