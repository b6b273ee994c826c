//! Pipeline stages for document text extraction.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. switch the OCR backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! bytes ──▶ classify ──▶ pdf ────────────┐
//!            (magic)     (text layer      │ blank? rasterize @ 200 DPI
//!                         or pages)       ▼
//!                        preprocess ──▶ encode ──▶ ocr
//!                        (5-step chain)  (PNG)     (tesseract)
//! ```
//!
//! 1. [`classify`]   — tag the buffer as PDF or image from its magic bytes
//! 2. [`pdf`]        — embedded-text extraction; per-page rasterization when
//!    the text layer is blank
//! 3. [`preprocess`] — orientation, grayscale, autocontrast, adaptive
//!    resize, sharpen; a pure function so idempotence stays testable
//! 4. [`encode`]     — PNG-encode the preprocessed image for the engine
//! 5. [`ocr`]        — drive Tesseract (or an injected recognizer); the only
//!    stage that talks to the recognition engine

pub mod classify;
pub mod encode;
pub mod ocr;
pub mod pdf;
pub mod preprocess;
