mod analytics;
mod catalog;
mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analytics::AnalyticsSink;
use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::session::manager::SessionManager;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging. The directive must use the crate name
    // (the bin target, not the package), or the default filter matches no
    // module paths and the service runs silent.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Learning Drop API v{}", env!("CARGO_PKG_VERSION"));
    config.warn_on_missing();

    // Generation backend — the only component allowed to hold the credential.
    let backend = Arc::new(GeminiClient::new(config.gemini_api_key.clone()));
    info!("Generation client initialized (model: {})", llm_client::MODEL);

    let analytics = AnalyticsSink::new(config.analytics_webhook_url.clone());

    // Resource catalog: best effort — the service runs fine without it.
    let catalog = match &config.catalog_csv_url {
        Some(url) => match catalog::fetch_catalog(&reqwest::Client::new(), url).await {
            Ok(resources) => resources,
            Err(e) => {
                warn!("Failed to load resource catalog: {e}");
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    let state = AppState {
        backend,
        sessions: SessionManager::new(),
        analytics,
        catalog: Arc::new(catalog),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // the form is served from a separate origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_default_log_filter_matches_this_crates_targets() {
        // Tracing targets default to the module path, which is rooted at the
        // crate name. The default EnvFilter directive is built from
        // CARGO_CRATE_NAME, so the two must agree or nothing is ever logged.
        assert!(module_path!().starts_with(env!("CARGO_CRATE_NAME")));
    }
}
