//! # doc2text
//!
//! Extract plain text from a single document — PDF or raster image — with
//! OCR fallback.
//!
//! ## Why this crate?
//!
//! Document ingestion pipelines receive an undifferentiated stream of
//! uploads: born-digital PDFs, scanned PDFs with no text layer, photos of
//! receipts, screenshots. This crate routes each buffer down the cheapest
//! path that yields text — the PDF's embedded text layer when one exists,
//! Tesseract OCR over a preprocessed rendering otherwise — and always
//! answers with one well-formed JSON object, even for hostile input.
//!
//! ## Pipeline Overview
//!
//! ```text
//! bytes
//!  │
//!  ├─ 1. Classify    %PDF magic prefix → PDF, anything else → image
//!  ├─ 2. Extract     PDF: text layer per page; blank? rasterize @ 200 DPI
//!  │                 image: decode (EXIF-aware)
//!  ├─ 3. Preprocess  grayscale → autocontrast → bound longer side to
//!  │                 1000–3000 px → sharpen
//!  ├─ 4. Recognize   tesseract, --oem 3 --psm 6 -l eng
//!  └─ 5. Serialize   {"text": <string>, "error": <string>} on one line
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use doc2text::{extract, ExtractionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bytes = std::fs::read("scan.pdf")?;
//!     let config = ExtractionConfig::default();
//!     let result = extract(&bytes, &config);
//!     println!("{}", result.to_json_line());
//!     Ok(())
//! }
//! ```
//!
//! ## Failure contract
//!
//! Best-effort, never crash, always respond: stage failures (corrupt PDF,
//! undecodable image, OCR error) are logged to stderr and degrade to empty
//! text; only failures that prevent the pipeline from running at all (no
//! pdfium library) appear in the result's `error` field. stdout is always
//! parseable JSON.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `doc2text` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! doc2text = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{EngineMode, ExtractionConfig, ExtractionConfigBuilder, Segmentation};
pub use error::{ExtractError, StageError};
pub use extract::{extract, extract_text};
pub use output::{ExtractionResult, JSON_FALLBACK};
pub use pipeline::classify::{classify, DocumentKind};
pub use pipeline::ocr::{TesseractRecognizer, TextRecognizer};
