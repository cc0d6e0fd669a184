//! Skill lexicon — the phrase database the annotator matches against.
//!
//! The embedded default covers common engineering, data, and workplace
//! skills. Deployments with their own taxonomy point `SKILL_LEXICON_PATH`
//! at a JSON array of phrases.

use std::path::Path;

use anyhow::{bail, Context, Result};

/// Default skill phrases, lowercase. Multi-word phrases are matched as a
/// unit and win over their single-word prefixes.
pub const DEFAULT_LEXICON: &[&str] = &[
    // Languages
    "python",
    "java",
    "javascript",
    "typescript",
    "rust",
    "golang",
    "c++",
    "c#",
    "ruby",
    "php",
    "kotlin",
    "swift",
    "scala",
    "perl",
    "r",
    "matlab",
    "bash",
    "sql",
    "html",
    "css",
    // Frameworks and runtimes
    "react",
    "angular",
    "vue",
    "node.js",
    "django",
    "flask",
    "fastapi",
    "spring boot",
    "rails",
    "laravel",
    ".net",
    "express",
    "next.js",
    "svelte",
    // Data and ML
    "machine learning",
    "deep learning",
    "natural language processing",
    "computer vision",
    "data analysis",
    "data science",
    "data engineering",
    "data visualization",
    "statistics",
    "pandas",
    "numpy",
    "scikit-learn",
    "tensorflow",
    "pytorch",
    "keras",
    "spark",
    "hadoop",
    "airflow",
    "dbt",
    "tableau",
    "power bi",
    "excel",
    "etl",
    // Databases
    "postgresql",
    "mysql",
    "mongodb",
    "redis",
    "elasticsearch",
    "cassandra",
    "sqlite",
    "oracle",
    "dynamodb",
    "snowflake",
    "bigquery",
    // Cloud and infrastructure
    "aws",
    "azure",
    "google cloud",
    "docker",
    "kubernetes",
    "terraform",
    "ansible",
    "jenkins",
    "gitlab",
    "github actions",
    "linux",
    "nginx",
    "serverless",
    "microservices",
    "distributed systems",
    "devops",
    "site reliability engineering",
    "continuous integration",
    "continuous delivery",
    "infrastructure as code",
    // Practices
    "agile",
    "scrum",
    "kanban",
    "test driven development",
    "unit testing",
    "integration testing",
    "code review",
    "pair programming",
    "rest api",
    "graphql",
    "grpc",
    "object oriented programming",
    "functional programming",
    "design patterns",
    "version control",
    "git",
    // Security and networking
    "cybersecurity",
    "penetration testing",
    "network security",
    "cryptography",
    "oauth",
    "tcp/ip",
    // Workplace
    "project management",
    "product management",
    "stakeholder management",
    "team leadership",
    "mentoring",
    "communication",
    "problem solving",
    "critical thinking",
    "collaboration",
    "time management",
    "public speaking",
    "technical writing",
    "customer service",
    "negotiation",
    "business analysis",
    "requirements gathering",
    "budgeting",
    "forecasting",
];

pub fn default_lexicon() -> Vec<String> {
    DEFAULT_LEXICON.iter().map(|s| s.to_string()).collect()
}

/// Loads a lexicon from a JSON array of strings. Blank entries are
/// rejected rather than silently dropped.
pub fn load(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read skill lexicon at {}", path.display()))?;
    let phrases: Vec<String> = serde_json::from_str(&raw)
        .with_context(|| format!("Skill lexicon at {} is not a JSON string array", path.display()))?;

    if phrases.is_empty() {
        bail!("Skill lexicon at {} is empty", path.display());
    }
    if phrases.iter().any(|p| p.trim().is_empty()) {
        bail!("Skill lexicon at {} contains blank phrases", path.display());
    }

    Ok(phrases)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lexicon_is_nonempty_and_lowercase() {
        let lexicon = default_lexicon();
        assert!(lexicon.len() > 100);
        for phrase in &lexicon {
            assert_eq!(phrase, &phrase.to_lowercase(), "{phrase} is not lowercase");
        }
    }

    #[test]
    fn test_default_lexicon_has_no_duplicates() {
        let mut lexicon = default_lexicon();
        let before = lexicon.len();
        lexicon.sort();
        lexicon.dedup();
        assert_eq!(lexicon.len(), before);
    }

    #[test]
    fn test_load_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        std::fs::write(&path, r#"["rust", "embedded systems"]"#).unwrap();

        let lexicon = load(&path).unwrap();
        assert_eq!(lexicon, vec!["rust", "embedded systems"]);
    }

    #[test]
    fn test_load_rejects_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        std::fs::write(&path, "[]").unwrap();

        assert!(load(&path).is_err());
    }

    #[test]
    fn test_load_rejects_blank_phrase() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        std::fs::write(&path, r#"["rust", "  "]"#).unwrap();

        assert!(load(&path).is_err());
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(load(Path::new("/nonexistent/lexicon.json")).is_err());
    }
}
