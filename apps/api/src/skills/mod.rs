//! Skill annotation — locates known skill phrases in free text.
//!
//! The matcher reports two categories: full matches (exact phrase hits on
//! word boundaries) and partial matches (near-miss tokens via Jaro-Winkler).
//! Only full matches feed response payloads; partials are diagnostics.

pub mod lexicon;

use std::collections::HashSet;

use aho_corasick::{AhoCorasick, MatchKind};
use anyhow::{Context, Result};
use strsim::jaro_winkler;

use crate::config::Config;

/// Similarity threshold above which a token counts as a partial match.
const PARTIAL_THRESHOLD: f64 = 0.88;

/// Tokens shorter than this are never considered for partial matching.
const MIN_PARTIAL_TOKEN_LEN: usize = 3;

/// A single located skill mention. Offsets are byte positions in the
/// annotated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillMatch {
    pub phrase: String,
    pub start: usize,
    pub end: usize,
}

/// All match categories reported for one text.
#[derive(Debug, Default)]
pub struct SkillMatches {
    pub full: Vec<SkillMatch>,
    /// Near-miss tokens. Diagnostics only, never part of a payload.
    #[allow(dead_code)]
    pub partial: Vec<SkillMatch>,
}

/// Case-insensitive, leftmost-longest phrase matcher over a skill lexicon.
/// Built once at startup; read-only afterwards.
pub struct SkillAnnotator {
    matcher: AhoCorasick,
    lexicon: Vec<String>,
}

impl SkillAnnotator {
    pub fn from_config(config: &Config) -> Result<Self> {
        let lexicon = match &config.lexicon_path {
            Some(path) => lexicon::load(path)?,
            None => lexicon::default_lexicon(),
        };
        Self::new(lexicon)
    }

    pub fn new(lexicon: Vec<String>) -> Result<Self> {
        let mut lexicon: Vec<String> = lexicon.iter().map(|p| p.trim().to_lowercase()).collect();
        // Longest first so multi-word phrases win over their prefixes
        lexicon.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        lexicon.dedup();

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&lexicon)
            .context("Failed to build skill matcher")?;

        Ok(Self { matcher, lexicon })
    }

    pub fn lexicon_len(&self) -> usize {
        self.lexicon.len()
    }

    /// Distinct full-match skill phrases, in first-seen document order.
    pub fn annotate(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut skills = Vec::new();
        for m in self.matches(text).full {
            if seen.insert(m.phrase.clone()) {
                skills.push(m.phrase);
            }
        }
        skills
    }

    /// Raw match categories with positions, duplicates included.
    pub fn matches(&self, text: &str) -> SkillMatches {
        let mut out = SkillMatches::default();

        for mat in self.matcher.find_iter(text) {
            if !on_word_boundary(text, mat.start(), mat.end()) {
                continue;
            }
            out.full.push(SkillMatch {
                phrase: self.lexicon[mat.pattern().as_usize()].clone(),
                start: mat.start(),
                end: mat.end(),
            });
        }

        out.partial = self.partial_matches(text, &out.full);
        out
    }

    /// Near-miss tokens: not inside any full match, but within the fuzzy
    /// threshold of a single-word lexicon phrase.
    fn partial_matches(&self, text: &str, full: &[SkillMatch]) -> Vec<SkillMatch> {
        let mut out = Vec::new();

        for (offset, token) in tokenize(text) {
            if token.len() < MIN_PARTIAL_TOKEN_LEN {
                continue;
            }
            if full.iter().any(|m| offset >= m.start && offset < m.end) {
                continue;
            }
            let token_lower = token.to_lowercase();
            for phrase in &self.lexicon {
                if phrase.contains(' ') || token_lower == *phrase {
                    continue;
                }
                if jaro_winkler(&token_lower, phrase) >= PARTIAL_THRESHOLD {
                    out.push(SkillMatch {
                        phrase: phrase.clone(),
                        start: offset,
                        end: offset + token.len(),
                    });
                    break;
                }
            }
        }

        out
    }
}

/// A match only counts when it is not embedded in a longer word, so "java"
/// never fires inside "javascripty" text it did not fully cover.
fn on_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(|c| c.is_alphanumeric()) && !after.is_some_and(|c| c.is_alphanumeric())
}

/// Yields (byte_offset, token) pairs. `+` and `#` stay inside tokens so
/// "c++" and "c#" survive tokenization.
fn tokenize(text: &str) -> Vec<(usize, &str)> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (i, c) in text.char_indices() {
        if c.is_alphanumeric() || c == '+' || c == '#' {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            tokens.push((s, &text[s..i]));
        }
    }
    if let Some(s) = start {
        tokens.push((s, &text[s..]));
    }

    tokens
}
