mod collect;
mod config;
mod errors;
mod extract;
mod routes;
mod scoring;
mod skills;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::scoring::{SkillScorer, TermVectorScorer};
use crate::skills::SkillAnnotator;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillScreen API v{}", env!("CARGO_PKG_VERSION"));

    // Build the skill annotator once. It is read-only after this point and
    // shared across all requests — no lazy init on the request path.
    let annotator = Arc::new(SkillAnnotator::from_config(&config)?);
    info!(
        "Skill annotator initialized ({} lexicon phrases)",
        annotator.lexicon_len()
    );

    // Similarity backend (TermVectorScorer by default — swap the trait object
    // to plug in an embedding-backed scorer)
    let scorer: Arc<dyn SkillScorer> = Arc::new(TermVectorScorer);
    info!("Similarity scorer initialized (backend: {})", scorer.name());

    // Build app state
    let state = AppState {
        config: config.clone(),
        annotator,
        scorer,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
