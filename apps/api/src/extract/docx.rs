//! DOCX text extraction using docx-rs.
//!
//! Walks the document body and joins paragraph text with newlines,
//! preserving paragraph order. Tables and other non-paragraph children are
//! skipped.

use std::path::Path;

use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use super::ExtractError;

pub fn extract(path: &Path) -> Result<String, ExtractError> {
    let content = std::fs::read(path)?;
    extract_bytes(&content)
}

pub fn extract_bytes(content: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(content).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let mut paragraphs: Vec<String> = Vec::new();
    for child in docx.document.children {
        if let DocumentChild::Paragraph(p) = child {
            paragraphs.push(paragraph_text(&p));
        }
    }

    Ok(paragraphs.join("\n"))
}

/// Extracts the visible text of a paragraph: run text, tabs, line breaks,
/// and hyperlink run text.
fn paragraph_text(p: &docx_rs::Paragraph) -> String {
    let mut text = String::new();

    for child in &p.children {
        match child {
            ParagraphChild::Run(r) => {
                for run_child in &r.children {
                    match run_child {
                        RunChild::Text(t) => text.push_str(&t.text),
                        RunChild::Tab(_) => text.push('\t'),
                        RunChild::Break(_) => text.push('\n'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(h) => {
                for child in &h.children {
                    if let ParagraphChild::Run(r) = child {
                        for run_child in &r.children {
                            if let RunChild::Text(t) = run_child {
                                text.push_str(&t.text);
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }

    text
}
