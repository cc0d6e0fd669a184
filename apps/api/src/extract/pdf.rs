//! PDF text extraction using pdf-extract.

use std::path::Path;

use super::ExtractError;

/// Extracts plain text from a PDF on disk, pages concatenated in page order.
/// Image-only pages contribute nothing; there is no OCR fallback.
pub fn extract(path: &Path) -> Result<String, ExtractError> {
    pdf_extract::extract_text(path).map_err(|e| ExtractError::Pdf(e.to_string()))
}
