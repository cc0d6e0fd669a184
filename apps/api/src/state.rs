use std::sync::Arc;

use crate::config::Config;
use crate::scoring::SkillScorer;
use crate::skills::SkillAnnotator;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// The annotator and scorer are constructed once in `main` and never mutated
/// afterwards, so cloning the state per request is cheap and lock-free.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Skill phrase matcher built over the configured lexicon.
    pub annotator: Arc<SkillAnnotator>,
    /// Pluggable similarity backend. Default: TermVectorScorer.
    pub scorer: Arc<dyn SkillScorer>,
}
