use std::sync::Arc;

use crate::analytics::AnalyticsSink;
use crate::catalog::LearningResource;
use crate::config::Config;
use crate::llm_client::GenerationBackend;
use crate::session::manager::SessionManager;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generation backend behind a trait so tests can stub the transport.
    pub backend: Arc<dyn GenerationBackend>,
    pub sessions: SessionManager,
    pub analytics: AnalyticsSink,
    /// Curated resource sheet, loaded once at startup. Held for future use —
    /// the generation pipeline relies on live search, not this catalog.
    pub catalog: Arc<Vec<LearningResource>>,
    pub config: Config,
}
