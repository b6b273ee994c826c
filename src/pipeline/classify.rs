//! Input classification: tag a byte buffer as PDF or raster image.
//!
//! Classification is based solely on the 4-byte magic-number prefix —
//! never on a file extension or declared content type, which hostile or
//! confused callers can get wrong. Anything without the `%PDF` signature
//! is treated as a decodable raster image and handed to the image path,
//! where an actual decode failure is caught and logged. Absence of the
//! prefix is a normal classification, not an error.

/// The PDF magic-byte signature (`%PDF`).
const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// The kind of document a buffer holds, derived once from its leading bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Buffer starts with `%PDF`.
    Pdf,
    /// Everything else: a raster image in any format the decoder understands.
    Image,
}

/// Classify a (non-empty) buffer by its magic-byte prefix.
///
/// Infallible by contract: short or malformed buffers classify as
/// [`DocumentKind::Image`] and fail later at the decode stage. Empty
/// buffers are short-circuited by the caller before classification.
pub fn classify(buffer: &[u8]) -> DocumentKind {
    if buffer.starts_with(PDF_MAGIC) {
        DocumentKind::Pdf
    } else {
        DocumentKind::Image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_prefix_classifies_as_pdf() {
        assert_eq!(classify(b"%PDF-1.7\n...garbage"), DocumentKind::Pdf);
        // Trailing content is irrelevant; only the prefix counts.
        assert_eq!(classify(b"%PDF"), DocumentKind::Pdf);
        assert_eq!(classify(&[0x25, 0x50, 0x44, 0x46, 0xFF]), DocumentKind::Pdf);
    }

    #[test]
    fn non_pdf_prefix_classifies_as_image() {
        assert_eq!(classify(b"\x89PNG\r\n\x1a\n"), DocumentKind::Image);
        assert_eq!(classify(b"\xff\xd8\xff\xe0JFIF"), DocumentKind::Image);
        assert_eq!(classify(b"random bytes"), DocumentKind::Image);
    }

    #[test]
    fn truncated_prefix_is_image() {
        // A buffer shorter than the magic cannot match it.
        assert_eq!(classify(b"%PD"), DocumentKind::Image);
        assert_eq!(classify(b"%"), DocumentKind::Image);
    }

    #[test]
    fn case_sensitive_match_only() {
        assert_eq!(classify(b"%pdf-1.4"), DocumentKind::Image);
    }
}
