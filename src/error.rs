//! Error types for the doc2text library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ExtractError`] — **Fatal**: the extraction cannot proceed at all
//!   (pdfium library missing, OCR engine failed to initialise). Returned as
//!   `Err(ExtractError)` from the top-level `extract*` functions and
//!   surfaced to the caller in the `error` field of the JSON result.
//!
//! * [`StageError`] — **Non-fatal**: one pipeline stage failed for one
//!   document or page (corrupt PDF, undecodable image, OCR glitch). Logged
//!   to the diagnostic channel and recovered locally: the stage degrades to
//!   empty text and the pipeline continues. Stage failures never appear in
//!   the structured result, so the host process always receives parseable
//!   JSON.
//!
//! The separation keeps the "best-effort, never crash, always respond"
//! contract checkable at the type level: only `ExtractError` can reach the
//! serializer, and even that is folded into a well-formed JSON object.

use thiserror::Error;

/// All fatal errors returned by the doc2text library.
///
/// Stage-level failures use [`StageError`] and are swallowed after logging
/// rather than propagated here.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\
Set PDFIUM_LIB_PATH=/path/to/libpdfium or install pdfium system-wide."
    )]
    PdfiumBindingFailed(String),

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single pipeline stage.
///
/// Each variant names the stage that failed so diagnostic log lines can be
/// attributed without parsing free-form messages. The overall extraction
/// continues; the failing stage contributes an empty string.
#[derive(Debug, Clone, Error)]
pub enum StageError {
    /// The PDF could not be parsed (corrupt header, broken xref,
    /// unsupported structure).
    #[error("PDF processing error: {0}")]
    PdfParse(String),

    /// A single page could not be rasterized.
    #[error("Page {page} rasterization error: {detail}")]
    PageRender { page: usize, detail: String },

    /// The input buffer could not be decoded as an image.
    #[error("Image processing error: {0}")]
    ImageDecode(String),

    /// PNG re-encoding for the OCR engine failed.
    #[error("Image encoding error: {0}")]
    ImageEncode(String),

    /// The OCR engine returned an error for one image.
    #[error("OCR error: {0}")]
    Ocr(String),
}

impl StageError {
    /// Short stage tag used as the `stage` field on diagnostic log lines.
    pub fn stage(&self) -> &'static str {
        match self {
            StageError::PdfParse(_) => "pdf",
            StageError::PageRender { .. } => "render",
            StageError::ImageDecode(_) => "decode",
            StageError::ImageEncode(_) => "encode",
            StageError::Ocr(_) => "ocr",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_error_display_includes_detail() {
        let e = StageError::PdfParse("broken xref".into());
        assert!(e.to_string().contains("broken xref"));
        assert_eq!(e.stage(), "pdf");
    }

    #[test]
    fn page_render_display_includes_page() {
        let e = StageError::PageRender {
            page: 3,
            detail: "bitmap allocation failed".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("Page 3"), "got: {msg}");
        assert_eq!(e.stage(), "render");
    }

    #[test]
    fn binding_failure_display_names_the_override() {
        let e = ExtractError::PdfiumBindingFailed("library not found".into());
        assert!(e.to_string().contains("library not found"));
        assert!(e.to_string().contains("PDFIUM_LIB_PATH"));
    }
}
