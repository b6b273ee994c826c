//! PDF extraction: embedded text layer first, rasterization + OCR second.
//!
//! ## Why two passes?
//!
//! Most born-digital PDFs carry a text layer that is both faster and more
//! accurate than any OCR of the rendered page, so pass 1 concatenates each
//! page's embedded text in document order and returns it when the trimmed
//! result is non-empty — the OCR engine is never touched. Scanned PDFs
//! yield a blank pass 1; pass 2 then renders every page at the configured
//! DPI and routes it through preprocessing and recognition. The OCR output
//! is appended to whatever (blank or whitespace-only) text pass 1 already
//! accumulated, so a whitespace-only text layer still prefixes the result.
//!
//! The document stays open across both passes; page handles are owned by
//! the parsed document and released when extraction returns.

use crate::config::ExtractionConfig;
use crate::error::{ExtractError, StageError};
use crate::pipeline::ocr::TextRecognizer;
use crate::pipeline::preprocess;
use image::DynamicImage;
use pdfium_render::prelude::*;
use tracing::{debug, info, warn};

/// Bind to a pdfium library, preferring an explicit `PDFIUM_LIB_PATH`,
/// then a copy next to the executable, then the system library.
pub fn bind_pdfium() -> Result<Pdfium, ExtractError> {
    if let Ok(path) = std::env::var("PDFIUM_LIB_PATH") {
        if !path.is_empty() {
            return Pdfium::bind_to_library(&path)
                .map(Pdfium::new)
                .map_err(|e| ExtractError::PdfiumBindingFailed(format!("{e:?}")));
        }
    }

    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map(Pdfium::new)
        .map_err(|e| ExtractError::PdfiumBindingFailed(format!("{e:?}")))
}

/// Extract text from a PDF buffer: text layer if present, OCR otherwise.
///
/// Returns `Err` only when the buffer cannot be parsed as a PDF at all;
/// the caller logs that and degrades to empty text. Per-page render and
/// OCR failures are logged here and skipped — one bad page never aborts
/// its siblings.
pub fn extract_pdf_text(
    pdfium: &Pdfium,
    buffer: &[u8],
    config: &ExtractionConfig,
    recognizer: &dyn TextRecognizer,
) -> Result<String, StageError> {
    let document = pdfium
        .load_pdf_from_byte_slice(buffer, None)
        .map_err(|e| StageError::PdfParse(format!("{e:?}")))?;

    let pages = document.pages();
    let page_count = pages.len() as usize;
    info!("PDF loaded: {} pages", page_count);

    // Pass 1: embedded text layer, concatenated in page order with no
    // separator beyond what each page's text already contains.
    let mut text = String::new();
    for page in pages.iter() {
        match page.text() {
            Ok(layer) => text.push_str(&layer.all()),
            // A page without a text layer contributes the empty string.
            Err(e) => debug!("no text layer on page: {e:?}"),
        }
    }

    if !text.trim().is_empty() {
        info!(
            "text layer present ({} bytes), skipping OCR",
            text.len()
        );
        return Ok(text);
    }

    // Pass 2: blank text layer — rasterize each page and OCR it, appending
    // to the (blank or whitespace-only) pass-1 accumulation.
    info!("text layer blank, falling back to OCR for {} pages", page_count);

    for (idx, page) in pages.iter().enumerate() {
        let page_num = idx + 1;
        let rendered = match render_page(&page, page_num, config.dpi) {
            Ok(img) => img,
            Err(e) => {
                warn!(stage = e.stage(), "{e}");
                continue;
            }
        };

        let prepared = preprocess::preprocess(&rendered, config);
        match recognizer.recognize(&prepared, config) {
            Ok(ocr_text) => text.push_str(&ocr_text),
            Err(e) => warn!(stage = e.stage(), "page {page_num}: {e}"),
        }
    }

    Ok(text)
}

/// Rasterize one page at the given DPI.
///
/// Color mode follows the page: RGB when it has no transparency, RGBA
/// otherwise.
fn render_page(page: &PdfPage, page_num: usize, dpi: u32) -> Result<DynamicImage, StageError> {
    let (width_px, height_px) =
        pixel_dimensions(page.width().value, page.height().value, dpi);

    let render_config = PdfRenderConfig::new()
        .set_target_width(width_px)
        .set_maximum_height(height_px);

    let bitmap =
        page.render_with_config(&render_config)
            .map_err(|e| StageError::PageRender {
                page: page_num,
                detail: format!("{e:?}"),
            })?;

    let image = bitmap.as_image();
    debug!(
        "rendered page {} → {}x{} px",
        page_num,
        image.width(),
        image.height()
    );

    Ok(if page.has_transparency() {
        DynamicImage::ImageRgba8(image.to_rgba8())
    } else {
        DynamicImage::ImageRgb8(image.to_rgb8())
    })
}

/// Convert a page size in PDF points (1/72 in) to pixels at `dpi`.
fn pixel_dimensions(width_pts: f32, height_pts: f32, dpi: u32) -> (i32, i32) {
    let scale = dpi as f32 / 72.0;
    (
        (width_pts * scale).round().max(1.0) as i32,
        (height_pts * scale).round().max(1.0) as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn us_letter_at_200_dpi() {
        // 8.5in × 11in = 612 × 792 points.
        assert_eq!(pixel_dimensions(612.0, 792.0, 200), (1700, 2200));
    }

    #[test]
    fn a4_at_200_dpi() {
        let (w, h) = pixel_dimensions(595.0, 842.0, 200);
        assert_eq!((w, h), (1653, 2339));
    }

    #[test]
    fn degenerate_page_size_still_positive() {
        assert_eq!(pixel_dimensions(0.0, 0.0, 200), (1, 1));
    }
}
