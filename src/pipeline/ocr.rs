//! OCR recognition: drive Tesseract over a preprocessed image.
//!
//! The engine sits behind the [`TextRecognizer`] trait so tests can inject
//! a counting mock (proving the text-layer fast path never reaches OCR)
//! and embedders can swap in another backend. The production
//! implementation is [`TesseractRecognizer`], configured per call from
//! [`ExtractionConfig`] — engine mode, segmentation mode, and language are
//! explicit arguments, never process-global state.

use crate::config::{EngineMode, ExtractionConfig, Segmentation};
use crate::error::StageError;
use crate::pipeline::encode;
use image::DynamicImage;
use tesseract::{OcrEngineMode, PageSegMode, Tesseract};
use tracing::debug;

/// A text recognition engine: preprocessed image in, plain text out.
///
/// Implementations must tolerate arbitrary image content and sizes; an
/// engine failure is reported as a [`StageError`] which the caller
/// degrades to empty text for that image or page, never aborting sibling
/// pages.
pub trait TextRecognizer: Send + Sync {
    /// Recognize text in `image`. An image with no recognizable text
    /// yields `Ok` with an empty string, not an error.
    fn recognize(
        &self,
        image: &DynamicImage,
        config: &ExtractionConfig,
    ) -> Result<String, StageError>;
}

/// The built-in Tesseract-backed recognizer.
///
/// A fresh engine handle is created per image: the `tesseract` crate's
/// builder API consumes the handle on configuration, and per-call
/// initialisation keeps the pipeline free of shared mutable state.
#[derive(Debug, Default)]
pub struct TesseractRecognizer;

impl TextRecognizer for TesseractRecognizer {
    fn recognize(
        &self,
        image: &DynamicImage,
        config: &ExtractionConfig,
    ) -> Result<String, StageError> {
        let png = encode::encode_png(image)?;

        let mut engine = Tesseract::new_with_oem(
            config.tessdata_path.as_deref(),
            Some(&config.lang),
            engine_mode(config.engine_mode),
        )
        .map_err(|e| StageError::Ocr(format!("engine init ({}): {e}", config.lang)))?
        .set_image_from_mem(&png)
        .map_err(|e| StageError::Ocr(format!("set image: {e}")))?;

        engine.set_page_seg_mode(seg_mode(config.segmentation));

        let text = engine
            .get_text()
            .map_err(|e| StageError::Ocr(format!("recognition: {e}")))?;

        debug!(
            "recognized {} bytes of text from {}x{} image",
            text.len(),
            image.width(),
            image.height()
        );
        Ok(text)
    }
}

fn engine_mode(mode: EngineMode) -> OcrEngineMode {
    match mode {
        EngineMode::Legacy => OcrEngineMode::TesseractOnly,
        EngineMode::LstmOnly => OcrEngineMode::LstmOnly,
        EngineMode::Combined => OcrEngineMode::TesseractLstmCombined,
        EngineMode::Default => OcrEngineMode::Default,
    }
}

fn seg_mode(psm: Segmentation) -> PageSegMode {
    match psm {
        Segmentation::Auto => PageSegMode::PsmAuto,
        Segmentation::SingleColumn => PageSegMode::PsmSingleColumn,
        Segmentation::SingleBlock => PageSegMode::PsmSingleBlock,
        Segmentation::SingleLine => PageSegMode::PsmSingleLine,
        Segmentation::SparseText => PageSegMode::PsmSparseText,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_maps_to_oem3_psm6() {
        let c = ExtractionConfig::default();
        assert!(matches!(engine_mode(c.engine_mode), OcrEngineMode::Default));
        assert!(matches!(
            seg_mode(c.segmentation),
            PageSegMode::PsmSingleBlock
        ));
    }

    #[test]
    fn recognizer_trait_is_object_safe() {
        fn assert_dyn(_: &dyn TextRecognizer) {}
        assert_dyn(&TesseractRecognizer);
    }
}
