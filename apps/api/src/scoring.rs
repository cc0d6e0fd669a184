//! Similarity scoring over skill text.
//!
//! Comparison happens on "skill text" — the space-joined distinct skill
//! phrases of a document — not on raw document content. The backend sits
//! behind the `SkillScorer` trait so an embedding-backed scorer can be
//! swapped in without touching the endpoint or handler code.
//!
//! Carried in `AppState` as `Arc<dyn SkillScorer>`.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;

/// Joins a document's recognized skill phrases into its skill text.
pub fn skill_text(skills: &[String]) -> String {
    skills.join(" ")
}

#[async_trait]
pub trait SkillScorer: Send + Sync {
    /// Similarity of two skill texts in [0, 1]. Must be symmetric, and must
    /// return a defined value (0.0) when either input is empty.
    async fn score(&self, a: &str, b: &str) -> f32;

    /// Backend label, reported in logs.
    fn name(&self) -> &'static str;
}

/// Deterministic term-vector backend: each skill text becomes a term
/// frequency vector over the union vocabulary of both texts, compared by
/// cosine similarity.
pub struct TermVectorScorer;

#[async_trait]
impl SkillScorer for TermVectorScorer {
    async fn score(&self, a: &str, b: &str) -> f32 {
        cosine_over_terms(a, b)
    }

    fn name(&self) -> &'static str {
        "term-vector"
    }
}

fn term_counts(text: &str) -> HashMap<&str, f32> {
    let mut counts: HashMap<&str, f32> = HashMap::new();
    for term in text.split_whitespace() {
        *counts.entry(term).or_insert(0.0) += 1.0;
    }
    counts
}

fn cosine_over_terms(a: &str, b: &str) -> f32 {
    let counts_a = term_counts(a);
    let counts_b = term_counts(b);

    // Empty skill text has no defined direction; score it zero instead of
    // propagating a NaN.
    if counts_a.is_empty() || counts_b.is_empty() {
        return 0.0;
    }

    let vocab: BTreeSet<&str> = counts_a.keys().chain(counts_b.keys()).copied().collect();
    let vec_a: Vec<f32> = vocab
        .iter()
        .map(|t| counts_a.get(*t).copied().unwrap_or(0.0))
        .collect();
    let vec_b: Vec<f32> = vocab
        .iter()
        .map(|t| counts_b.get(*t).copied().unwrap_or(0.0))
        .collect();

    // Term counts are non-negative, so cosine lands in [0, 1]; the clamp
    // only absorbs float drift.
    cosine_similarity(&vec_a, &vec_b).clamp(0.0, 1.0)
}

/// Cosine similarity between two equal-length vectors.
/// Returns 0.0 for mismatched lengths or zero-norm inputs.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Scales a [0, 1] similarity to the 0–100 response score, rounded to
/// exactly two decimal places.
pub fn to_percent(similarity: f32) -> f64 {
    (f64::from(similarity) * 100.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![1.0, 2.0, 3.0];
        let sim = cosine_similarity(&a, &a);
        assert!((sim - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_zero_norm() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_similarity_length_mismatch() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    }

    #[tokio::test]
    async fn test_identical_skill_texts_score_one() {
        let sim = TermVectorScorer.score("python sql docker", "python sql docker").await;
        assert!((sim - 1.0).abs() < 0.0001);
    }

    #[tokio::test]
    async fn test_disjoint_skill_texts_score_zero() {
        let sim = TermVectorScorer.score("python sql", "kubernetes terraform").await;
        assert!(sim.abs() < 0.0001);
    }

    #[tokio::test]
    async fn test_score_is_symmetric() {
        let ab = TermVectorScorer.score("python sql docker", "python terraform").await;
        let ba = TermVectorScorer.score("python terraform", "python sql docker").await;
        assert_eq!(ab, ba);
    }

    #[tokio::test]
    async fn test_empty_skill_text_scores_zero() {
        assert_eq!(TermVectorScorer.score("", "python sql").await, 0.0);
        assert_eq!(TermVectorScorer.score("python sql", "").await, 0.0);
        assert_eq!(TermVectorScorer.score("", "").await, 0.0);
    }

    #[tokio::test]
    async fn test_partial_overlap_scores_between_bounds() {
        let sim = TermVectorScorer.score("python sql", "python terraform").await;
        assert!(sim > 0.0 && sim < 1.0);
    }

    #[test]
    fn test_to_percent_rounds_to_two_decimals() {
        assert_eq!(to_percent(0.123456), 12.35);
        assert_eq!(to_percent(1.0), 100.0);
        assert_eq!(to_percent(0.0), 0.0);
    }

    #[test]
    fn test_to_percent_stays_in_range() {
        for sim in [0.0_f32, 0.25, 0.5, 0.999, 1.0] {
            let pct = to_percent(sim);
            assert!((0.0..=100.0).contains(&pct));
        }
    }

    #[test]
    fn test_skill_text_joins_with_spaces() {
        let skills = vec!["python".to_string(), "machine learning".to_string()];
        assert_eq!(skill_text(&skills), "python machine learning");
    }

    #[test]
    fn test_skill_text_empty_set_is_empty_string() {
        assert_eq!(skill_text(&[]), "");
    }
}
