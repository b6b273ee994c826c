//! Configuration types for text extraction.
//!
//! All extraction behaviour is controlled through [`ExtractionConfig`], built
//! via its [`ExtractionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across calls, log them, and diff two runs to
//! understand why their outputs differ.
//!
//! The OCR engine settings (engine mode, segmentation mode, language) are
//! plain config values passed explicitly into the recognizer call — never
//! ambient global state — so tests can run with alternate configurations
//! without process-wide side effects.

use crate::error::ExtractError;
use crate::pipeline::ocr::TextRecognizer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Configuration for one extraction run.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use doc2text::ExtractionConfig;
///
/// let config = ExtractionConfig::builder()
///     .dpi(200)
///     .lang("eng")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Rendering DPI used when rasterising a PDF page for OCR. Range: 72–400.
    /// Default: 200.
    ///
    /// 200 DPI keeps body text comfortably above Tesseract's minimum usable
    /// glyph height without producing the multi-hundred-megapixel bitmaps a
    /// 400 DPI render of a large page would.
    pub dpi: u32,

    /// Tesseract language model. Default: `"eng"`.
    pub lang: String,

    /// OCR engine mode (Tesseract `--oem`). Default: [`EngineMode::Default`]
    /// (`--oem 3`, LSTM with legacy fallback).
    pub engine_mode: EngineMode,

    /// Page segmentation mode (Tesseract `--psm`). Default:
    /// [`Segmentation::SingleBlock`] (`--psm 6`, assume a single uniform
    /// block of text) — the right assumption for full-page scans and
    /// rendered PDF pages.
    pub segmentation: Segmentation,

    /// Override for the Tesseract data directory. `None` lets the engine
    /// fall back to `TESSDATA_PREFIX` and its compiled-in default.
    pub tessdata_path: Option<String>,

    /// Lower bound for the preprocessed image's longer side, in pixels.
    /// Default: 1000.
    ///
    /// Smaller scans are upscaled isotropically to exactly this size so the
    /// engine sees glyphs large enough to segment.
    pub min_ocr_px: u32,

    /// Upper bound for the preprocessed image's longer side, in pixels.
    /// Default: 3000.
    ///
    /// The only memory ceiling in the pipeline: hostile or absurdly large
    /// inputs are downscaled to this before OCR.
    pub max_ocr_px: u32,

    /// Fraction of outlier pixels clipped at each histogram end by the
    /// autocontrast step. Range: 0.0–0.4. Default: 0.01.
    pub autocontrast_cutoff: f32,

    /// Injected recognizer. Takes precedence over the built-in Tesseract
    /// recognizer; used by tests to count OCR invocations and by embedders
    /// that bring their own engine.
    pub recognizer: Option<Arc<dyn TextRecognizer>>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            dpi: 200,
            lang: "eng".to_string(),
            engine_mode: EngineMode::default(),
            segmentation: Segmentation::default(),
            tessdata_path: None,
            min_ocr_px: 1000,
            max_ocr_px: 3000,
            autocontrast_cutoff: 0.01,
            recognizer: None,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("dpi", &self.dpi)
            .field("lang", &self.lang)
            .field("engine_mode", &self.engine_mode)
            .field("segmentation", &self.segmentation)
            .field("tessdata_path", &self.tessdata_path)
            .field("min_ocr_px", &self.min_ocr_px)
            .field("max_ocr_px", &self.max_ocr_px)
            .field("autocontrast_cutoff", &self.autocontrast_cutoff)
            .field(
                "recognizer",
                &self.recognizer.as_ref().map(|_| "<dyn TextRecognizer>"),
            )
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi.clamp(72, 400);
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.config.lang = lang.into();
        self
    }

    pub fn engine_mode(mut self, mode: EngineMode) -> Self {
        self.config.engine_mode = mode;
        self
    }

    pub fn segmentation(mut self, psm: Segmentation) -> Self {
        self.config.segmentation = psm;
        self
    }

    pub fn tessdata_path(mut self, path: impl Into<String>) -> Self {
        self.config.tessdata_path = Some(path.into());
        self
    }

    pub fn min_ocr_px(mut self, px: u32) -> Self {
        self.config.min_ocr_px = px.max(1);
        self
    }

    pub fn max_ocr_px(mut self, px: u32) -> Self {
        self.config.max_ocr_px = px.max(1);
        self
    }

    pub fn autocontrast_cutoff(mut self, cutoff: f32) -> Self {
        self.config.autocontrast_cutoff = cutoff.clamp(0.0, 0.4);
        self
    }

    pub fn recognizer(mut self, recognizer: Arc<dyn TextRecognizer>) -> Self {
        self.config.recognizer = Some(recognizer);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, ExtractError> {
        let c = &self.config;
        if c.dpi < 72 || c.dpi > 400 {
            return Err(ExtractError::InvalidConfig(format!(
                "DPI must be 72–400, got {}",
                c.dpi
            )));
        }
        if c.lang.trim().is_empty() {
            return Err(ExtractError::InvalidConfig(
                "OCR language must not be empty".into(),
            ));
        }
        if c.min_ocr_px > c.max_ocr_px {
            return Err(ExtractError::InvalidConfig(format!(
                "min_ocr_px ({}) must be <= max_ocr_px ({})",
                c.min_ocr_px, c.max_ocr_px
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Tesseract OCR engine mode (`--oem`).
///
/// [`EngineMode::Default`] (`--oem 3`) lets the engine pick the LSTM
/// recogniser and fall back to the legacy engine where LSTM data is
/// unavailable, which is the right trade-off for mixed-quality scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EngineMode {
    /// Legacy engine only (`--oem 0`).
    Legacy,
    /// LSTM neural network only (`--oem 1`).
    LstmOnly,
    /// Legacy + LSTM combined (`--oem 2`).
    Combined,
    /// Default: based on what is available (`--oem 3`).
    #[default]
    Default,
}

/// Tesseract page segmentation mode (`--psm`), limited to the variants
/// that make sense for whole-document extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Segmentation {
    /// Fully automatic page segmentation (`--psm 3`).
    Auto,
    /// Assume a single column of text (`--psm 4`).
    SingleColumn,
    /// Assume a single uniform block of text (`--psm 6`). (default)
    #[default]
    SingleBlock,
    /// Treat the image as a single text line (`--psm 7`).
    SingleLine,
    /// Sparse text: find as much text as possible in no particular
    /// order (`--psm 11`).
    SparseText,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_reference_engine_flags() {
        let c = ExtractionConfig::default();
        assert_eq!(c.dpi, 200);
        assert_eq!(c.lang, "eng");
        assert_eq!(c.engine_mode, EngineMode::Default);
        assert_eq!(c.segmentation, Segmentation::SingleBlock);
        assert_eq!(c.min_ocr_px, 1000);
        assert_eq!(c.max_ocr_px, 3000);
    }

    #[test]
    fn builder_clamps_dpi() {
        let c = ExtractionConfig::builder().dpi(9999).build().unwrap();
        assert_eq!(c.dpi, 400);
        let c = ExtractionConfig::builder().dpi(10).build().unwrap();
        assert_eq!(c.dpi, 72);
    }

    #[test]
    fn builder_rejects_inverted_resize_bounds() {
        let err = ExtractionConfig::builder()
            .min_ocr_px(4000)
            .max_ocr_px(2000)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("min_ocr_px"));
    }

    #[test]
    fn builder_rejects_empty_language() {
        let err = ExtractionConfig::builder().lang("  ").build().unwrap_err();
        assert!(err.to_string().contains("language"));
    }

    #[test]
    fn autocontrast_cutoff_is_clamped() {
        let c = ExtractionConfig::builder()
            .autocontrast_cutoff(0.9)
            .build()
            .unwrap();
        assert!(c.autocontrast_cutoff <= 0.4);
    }
}
