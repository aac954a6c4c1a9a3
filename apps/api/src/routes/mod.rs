pub mod health;

use axum::{
    extract::State,
    routing::{get, patch, post},
    Json, Router,
};

use crate::catalog::LearningResource;
use crate::session::handlers;
use crate::state::AppState;

/// GET /api/v1/catalog — the curated resource sheet, as loaded at startup.
async fn catalog_handler(State(state): State<AppState>) -> Json<Vec<LearningResource>> {
    Json(state.catalog.as_ref().clone())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session API
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/profile",
            patch(handlers::handle_update_field),
        )
        .route(
            "/api/v1/sessions/:id/preferences/toggle",
            post(handlers::handle_toggle_preference),
        )
        .route(
            "/api/v1/sessions/:id/generate",
            post(handlers::handle_generate),
        )
        .route(
            "/api/v1/sessions/:id/regenerate",
            post(handlers::handle_regenerate),
        )
        // Catalog (external collaborator, read-only)
        .route("/api/v1/catalog", get(catalog_handler))
        .with_state(state)
}
