//! Top-level extraction entry points.
//!
//! The pipeline is strictly sequential and synchronous: one buffer in, one
//! result out, no shared state between invocations. [`extract`] is the
//! infallible entry point the CLI uses — every failure mode is folded into
//! a well-formed [`ExtractionResult`]. [`extract_text`] is the fallible
//! library-level variant for callers that want fatal errors as `Err`
//! instead of a JSON field.

use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use crate::output::ExtractionResult;
use crate::pipeline::classify::{classify, DocumentKind};
use crate::pipeline::ocr::{TesseractRecognizer, TextRecognizer};
use crate::pipeline::{pdf, preprocess};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Extract plain text from a document buffer, never failing.
///
/// * empty buffer — short-circuits to the empty-input result
///   (`{"text": ""}`, no `error` key) without invoking the classifier;
/// * stage failures (corrupt PDF, undecodable image, OCR glitch) — logged
///   to the diagnostic channel, text degrades to empty, `error` stays
///   empty;
/// * fatal failures (pdfium library missing) — captured into the `error`
///   field with empty text.
pub fn extract(buffer: &[u8], config: &ExtractionConfig) -> ExtractionResult {
    if buffer.is_empty() {
        info!("empty input buffer, nothing to extract");
        return ExtractionResult::empty_input();
    }

    match extract_text(buffer, config) {
        Ok(text) => ExtractionResult::ok(text),
        Err(e) => {
            error!("extraction failed: {e}");
            ExtractionResult::failed(e.to_string())
        }
    }
}

/// Extract plain text from a document buffer.
///
/// Classifies the buffer by magic bytes, then runs the PDF path
/// (text layer, OCR fallback) or the image path (preprocess + OCR).
/// Stage-level failures degrade to an empty string after logging; only
/// failures that prevent the pipeline from running at all (e.g. no pdfium
/// library to bind) surface as `Err`.
///
/// An empty buffer yields an empty string.
pub fn extract_text(buffer: &[u8], config: &ExtractionConfig) -> Result<String, ExtractError> {
    if buffer.is_empty() {
        return Ok(String::new());
    }

    let recognizer = resolve_recognizer(config);

    match classify(buffer) {
        DocumentKind::Pdf => extract_from_pdf(buffer, config, recognizer.as_ref()),
        DocumentKind::Image => Ok(extract_from_image(buffer, config, recognizer.as_ref())),
    }
}

/// Resolve the recognizer: the caller-injected one if present, otherwise
/// the built-in Tesseract engine.
fn resolve_recognizer(config: &ExtractionConfig) -> Arc<dyn TextRecognizer> {
    match config.recognizer {
        Some(ref r) => Arc::clone(r),
        None => Arc::new(TesseractRecognizer),
    }
}

/// PDF path: parse failures degrade to empty text; only a missing pdfium
/// library is fatal.
fn extract_from_pdf(
    buffer: &[u8],
    config: &ExtractionConfig,
    recognizer: &dyn TextRecognizer,
) -> Result<String, ExtractError> {
    let pdfium = pdf::bind_pdfium()?;

    match pdf::extract_pdf_text(&pdfium, buffer, config, recognizer) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!(stage = e.stage(), "{e}");
            Ok(String::new())
        }
    }
}

/// Image path: decode, preprocess, recognize. Any failure degrades to
/// empty text after logging.
fn extract_from_image(
    buffer: &[u8],
    config: &ExtractionConfig,
    recognizer: &dyn TextRecognizer,
) -> String {
    let decoded = match preprocess::decode_oriented(buffer) {
        Ok(img) => img,
        Err(e) => {
            warn!(stage = e.stage(), "{e}");
            return String::new();
        }
    };

    let prepared = preprocess::preprocess(&decoded, config);

    match recognizer.recognize(&prepared, config) {
        Ok(text) => text,
        Err(e) => {
            warn!(stage = e.stage(), "{e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, Luma};
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Recognizer that returns a fixed reply and counts invocations.
    struct FixedRecognizer {
        reply: &'static str,
        calls: AtomicUsize,
    }

    impl FixedRecognizer {
        fn new(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl TextRecognizer for FixedRecognizer {
        fn recognize(
            &self,
            _image: &DynamicImage,
            _config: &ExtractionConfig,
        ) -> Result<String, crate::error::StageError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.to_string())
        }
    }

    fn png_bytes() -> Vec<u8> {
        let mut buf = Vec::new();
        DynamicImage::ImageLuma8(GrayImage::from_pixel(64, 64, Luma([180])))
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn empty_buffer_short_circuits() {
        let config = ExtractionConfig::default();
        let result = extract(&[], &config);
        assert_eq!(result.to_json_line(), r#"{"text":""}"#);
    }

    #[test]
    fn image_path_routes_through_recognizer() {
        let mock = FixedRecognizer::new("scanned words");
        let config = ExtractionConfig::builder()
            .recognizer(mock.clone())
            .build()
            .unwrap();

        let result = extract(&png_bytes(), &config);
        assert_eq!(result.text, "scanned words");
        assert_eq!(result.error.as_deref(), Some(""));
        assert_eq!(mock.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn undecodable_image_degrades_to_empty_text() {
        let mock = FixedRecognizer::new("never seen");
        let config = ExtractionConfig::builder()
            .recognizer(mock.clone())
            .build()
            .unwrap();

        let result = extract(b"\xff\xfe random junk that is not an image", &config);
        assert_eq!(result.text, "");
        assert_eq!(result.error.as_deref(), Some(""));
        // Decode failed before recognition, so the engine never ran.
        assert_eq!(mock.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn recognizer_failure_degrades_to_empty_text() {
        struct FailingRecognizer;
        impl TextRecognizer for FailingRecognizer {
            fn recognize(
                &self,
                _image: &DynamicImage,
                _config: &ExtractionConfig,
            ) -> Result<String, crate::error::StageError> {
                Err(crate::error::StageError::Ocr("engine exploded".into()))
            }
        }

        let config = ExtractionConfig::builder()
            .recognizer(Arc::new(FailingRecognizer))
            .build()
            .unwrap();

        let result = extract(&png_bytes(), &config);
        assert_eq!(result.text, "");
        assert_eq!(result.error.as_deref(), Some(""));
    }

    #[test]
    fn output_always_parses_as_json_for_hostile_input() {
        let mock = FixedRecognizer::new("");
        let config = ExtractionConfig::builder()
            .recognizer(mock)
            .build()
            .unwrap();

        for input in [
            &b"\x00\x01\x02\x03"[..],
            b"%PD",
            b"<html>not a doc</html>",
            &[0xffu8; 64][..],
        ] {
            let line = extract(input, &config).to_json_line();
            let v: serde_json::Value = serde_json::from_str(&line).unwrap();
            assert!(v.get("text").is_some(), "missing text key for {input:?}");
        }
    }
}
