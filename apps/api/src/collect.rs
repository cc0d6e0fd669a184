//! Batch collection — turns a file source (directory walk or multipart
//! upload set) into a filename → extraction mapping.
//!
//! A `BTreeMap` keeps iteration deterministic and gives last-write-wins on
//! duplicate filenames. Consumers only rely on key lookup.

use std::collections::BTreeMap;
use std::path::Path;

use bytes::Bytes;
use tempfile::TempDir;
use tracing::debug;
use walkdir::WalkDir;

use crate::errors::AppError;
use crate::extract::{self, Extraction};

/// One uploaded file part: the client-supplied filename plus raw bytes.
pub struct UploadedFile {
    pub filename: String,
    pub content: Bytes,
}

/// Visits every file under `root` recursively. Non-PDF/DOCX files are
/// included with empty text rather than skipped.
pub fn collect_dir(root: &Path) -> BTreeMap<String, Extraction> {
    let mut extracted = BTreeMap::new();

    for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let filename = entry.file_name().to_string_lossy().into_owned();
        debug!("Collecting {}", entry.path().display());
        extracted.insert(filename, extract::extract_path(entry.path()));
    }

    extracted
}

/// Writes each upload into a scoped temp directory and extracts from disk,
/// so uploads and directory scans share one extraction path. The directory
/// and its contents are removed when the guard drops, on every exit path.
pub fn collect_uploads(files: &[UploadedFile]) -> Result<BTreeMap<String, Extraction>, AppError> {
    let tmp = TempDir::with_prefix("skillscreen-upload-")
        .map_err(|e| AppError::Extraction(format!("Failed to create scratch dir: {e}")))?;

    let mut extracted = BTreeMap::new();
    for file in files {
        let path = tmp.path().join(sanitize_filename(&file.filename));
        std::fs::write(&path, &file.content)
            .map_err(|e| AppError::Extraction(format!("Failed to stage upload: {e}")))?;
        extracted.insert(file.filename.clone(), extract::extract_path(&path));
    }

    Ok(extracted)
}

/// Reduces a client-supplied filename to its basename so an upload can never
/// escape the scratch directory.
fn sanitize_filename(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};

    fn write_docx(path: &Path, text: &str) {
        let docx =
            Docx::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)));
        let mut file = std::fs::File::create(path).unwrap();
        docx.build().pack(&mut file).unwrap();
    }

    #[test]
    fn test_collect_dir_visits_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("inner");
        std::fs::create_dir(&nested).unwrap();
        write_docx(&dir.path().join("top.docx"), "Rust developer");
        write_docx(&nested.join("deep.docx"), "SQL analyst");

        let extracted = collect_dir(dir.path());
        assert_eq!(extracted.len(), 2);
        assert_eq!(
            extracted["top.docx"],
            Extraction::Text("Rust developer".to_string())
        );
        assert_eq!(
            extracted["deep.docx"],
            Extraction::Text("SQL analyst".to_string())
        );
    }

    #[test]
    fn test_collect_dir_includes_unsupported_files_with_empty_text() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored body").unwrap();

        let extracted = collect_dir(dir.path());
        assert_eq!(
            extracted["notes.txt"],
            Extraction::Text(String::new()),
            "unsupported files must be present, with empty text"
        );
    }

    #[test]
    fn test_collect_dir_records_corrupt_file_as_failed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.pdf"), b"garbage").unwrap();

        let extracted = collect_dir(dir.path());
        assert!(matches!(extracted["broken.pdf"], Extraction::Failed(_)));
    }

    #[test]
    fn test_collect_uploads_keeps_original_filename_key() {
        let files = vec![UploadedFile {
            filename: "resume.txt".to_string(),
            content: Bytes::from_static(b"plain text"),
        }];

        let extracted = collect_uploads(&files).unwrap();
        assert_eq!(extracted["resume.txt"], Extraction::Text(String::new()));
    }

    #[test]
    fn test_collect_uploads_duplicate_filenames_last_write_wins() {
        let mut docx_a = std::io::Cursor::new(Vec::new());
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("first copy")))
            .build()
            .pack(&mut docx_a)
            .unwrap();
        let mut docx_b = std::io::Cursor::new(Vec::new());
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("second copy")))
            .build()
            .pack(&mut docx_b)
            .unwrap();

        let files = vec![
            UploadedFile {
                filename: "resume.docx".to_string(),
                content: Bytes::from(docx_a.into_inner()),
            },
            UploadedFile {
                filename: "resume.docx".to_string(),
                content: Bytes::from(docx_b.into_inner()),
            },
        ];

        let extracted = collect_uploads(&files).unwrap();
        assert_eq!(extracted.len(), 1);
        assert_eq!(
            extracted["resume.docx"],
            Extraction::Text("second copy".to_string())
        );
    }

    #[test]
    fn test_sanitize_filename_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("plain.pdf"), "plain.pdf");
        assert_eq!(sanitize_filename("dir/nested.docx"), "nested.docx");
        assert_eq!(sanitize_filename(""), "upload");
    }
}
