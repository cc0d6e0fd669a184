//! Document text extraction — PDF and DOCX, dispatched by file extension.

pub mod docx;
pub mod pdf;

use std::path::Path;

use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Outcome of extracting one file. A parse failure is a recorded value, not
/// a thrown error, so a single corrupt document cannot abort a whole batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Text(String),
    Failed(String),
}

impl Extraction {
    /// Text to feed downstream. A failed extraction contributes nothing,
    /// same as an unsupported file type.
    pub fn text(&self) -> &str {
        match self {
            Extraction::Text(t) => t,
            Extraction::Failed(_) => "",
        }
    }
}

/// Extracts text from a file on disk. Unsupported extensions yield empty
/// text rather than an error; the file still shows up in the batch mapping.
pub fn extract_path(path: &Path) -> Extraction {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    let result = match ext.as_deref() {
        Some("pdf") => pdf::extract(path),
        Some("docx") => docx::extract(path),
        _ => return Extraction::Text(String::new()),
    };

    match result {
        Ok(text) => Extraction::Text(text),
        Err(e) => {
            warn!("Extraction failed for {}: {e}", path.display());
            Extraction::Failed(e.to_string())
        }
    }
}
