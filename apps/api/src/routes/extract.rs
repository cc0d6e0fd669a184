//! POST /extract-text — the evaluation endpoint.
//!
//! Accepts either uploaded `files` parts or a server-local `folder` path,
//! plus a `job_description` field. Each document is reduced to its skill
//! set and scored against the job description's skill text.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::{debug, info};

use crate::collect::{self, UploadedFile};
use crate::errors::AppError;
use crate::extract::Extraction;
use crate::scoring::{skill_text, to_percent};
use crate::state::AppState;

/// Parsed form input. Uploads win when both sources are supplied.
#[derive(Default)]
struct ExtractForm {
    files: Vec<UploadedFile>,
    folder: Option<String>,
    job_description: Option<String>,
}

enum Source {
    Uploads(Vec<UploadedFile>),
    Folder(PathBuf),
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub job_description_skills: Vec<String>,
    pub resumes_skills: BTreeMap<String, Vec<String>>,
    pub resumes_scores: BTreeMap<String, f64>,
}

/// POST /extract-text
pub async fn handle_extract_text(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let form = read_form(multipart).await?;

    // Validation order matches the original contract: input source first,
    // then the job description. Nothing downstream runs on failure.
    let source = if !form.files.is_empty() {
        Source::Uploads(form.files)
    } else if let Some(folder) = form.folder.as_deref() {
        Source::Folder(resolve_folder(&state.config.scan_root, folder)?)
    } else {
        return Err(AppError::Validation("No files provided".to_string()));
    };

    let job_description = form
        .job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| AppError::Validation("No job description provided".to_string()))?;

    // Document parsing is synchronous and can be slow; keep it off the
    // async workers.
    let extracted = match source {
        Source::Uploads(files) => {
            tokio::task::spawn_blocking(move || collect::collect_uploads(&files))
                .await
                .map_err(|e| AppError::Internal(e.into()))??
        }
        Source::Folder(root) => tokio::task::spawn_blocking(move || collect::collect_dir(&root))
            .await
            .map_err(|e| AppError::Internal(e.into()))?,
    };

    info!("Extracted text from {} document(s)", extracted.len());

    let job_description_skills = state.annotator.annotate(&job_description);
    let jd_skill_text = skill_text(&job_description_skills);

    let mut resumes_skills = BTreeMap::new();
    let mut resumes_scores = BTreeMap::new();
    for (filename, outcome) in &extracted {
        if let Extraction::Failed(reason) = outcome {
            debug!("Scoring {filename} as empty, extraction failed: {reason}");
        }
        let skills = state.annotator.annotate(outcome.text());
        let similarity = state.scorer.score(&skill_text(&skills), &jd_skill_text).await;
        resumes_scores.insert(filename.clone(), to_percent(similarity));
        resumes_skills.insert(filename.clone(), skills);
    }

    Ok(Json(ExtractResponse {
        job_description_skills,
        resumes_skills,
        resumes_scores,
    }))
}

async fn read_form(mut multipart: Multipart) -> Result<ExtractForm, AppError> {
    let mut form = ExtractForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "files" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content = field.bytes().await?;
                form.files.push(UploadedFile { filename, content });
            }
            "job_description" => form.job_description = Some(field.text().await?),
            "folder" => form.folder = Some(field.text().await?),
            other => debug!("Ignoring unknown form field {other:?}"),
        }
    }

    Ok(form)
}

/// Treats the supplied folder as untrusted: it must resolve to an existing
/// directory under the configured scan root. Escapes and missing paths both
/// report "Folder not found" so callers cannot probe the filesystem.
fn resolve_folder(scan_root: &Path, folder: &str) -> Result<PathBuf, AppError> {
    let not_found = || AppError::Validation("Folder not found".to_string());

    let root = scan_root.canonicalize().map_err(|_| not_found())?;
    let resolved = root.join(folder).canonicalize().map_err(|_| not_found())?;

    if !resolved.starts_with(&root) || !resolved.is_dir() {
        return Err(not_found());
    }

    Ok(resolved)
}
