//! Axum route handlers for the Session API — the server-side boundary the
//! form talks to. The API credential never leaves this process; the UI only
//! ever sees parsed blocks, citations, and generic error text.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{LearningFormat, Profile};
use crate::session::controller::{SessionController, SessionSnapshot, SubmitOutcome};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub profile: Profile,
    /// The fixed vocabulary the form renders as checkboxes.
    pub available_preferences: Vec<LearningFormat>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFieldRequest {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct TogglePreferenceRequest {
    pub preference: LearningFormat,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Profile,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// False when the request was ignored because a generation was already
    /// in flight for this session.
    pub accepted: bool,
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

fn lookup(state: &AppState, session_id: Uuid) -> Result<std::sync::Arc<SessionController>, AppError> {
    state
        .sessions
        .get(session_id)
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))
}

/// POST /api/v1/sessions
///
/// Opens a session with the default (empty) profile.
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<Json<CreateSessionResponse>, AppError> {
    let controller = SessionController::new(
        Profile::default(),
        state.backend.clone(),
        state.analytics.clone(),
    );
    let profile = controller.snapshot().profile;
    let session_id = state.sessions.create(controller);
    Ok(Json(CreateSessionResponse {
        session_id,
        profile,
        available_preferences: LearningFormat::ALL.to_vec(),
    }))
}

/// GET /api/v1/sessions/:id
///
/// Full session snapshot: profile, generating flag, user-safe error, and —
/// when ready — the parsed Learning Drop with its citation list.
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let controller = lookup(&state, session_id)?;
    Ok(Json(controller.snapshot()))
}

/// DELETE /api/v1/sessions/:id
///
/// Ends a session and releases its state. The form calls this on unload;
/// anything it misses lives until process exit.
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(session_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {session_id} not found")))
    }
}

/// PATCH /api/v1/sessions/:id/profile
pub async fn handle_update_field(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<UpdateFieldRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let controller = lookup(&state, session_id)?;
    let profile = controller.update_field(&request.field, &request.value)?;
    Ok(Json(ProfileResponse { profile }))
}

/// POST /api/v1/sessions/:id/preferences/toggle
pub async fn handle_toggle_preference(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<TogglePreferenceRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let controller = lookup(&state, session_id)?;
    let profile = controller.toggle_preference(request.preference);
    Ok(Json(ProfileResponse { profile }))
}

/// POST /api/v1/sessions/:id/generate
///
/// Runs the full pipeline and returns the resulting snapshot. A concurrent
/// generation turns this into a no-op with `accepted: false`.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<GenerateResponse>, AppError> {
    let controller = lookup(&state, session_id)?;
    let outcome = controller.submit().await;
    Ok(Json(GenerateResponse {
        accepted: outcome == SubmitOutcome::Completed,
        snapshot: controller.snapshot(),
    }))
}

/// POST /api/v1/sessions/:id/regenerate
///
/// Same as generate, but asks the model for a disjoint set of resources by
/// feeding back the previous message.
pub async fn handle_regenerate(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<GenerateResponse>, AppError> {
    let controller = lookup(&state, session_id)?;
    let outcome = controller.regenerate().await;
    Ok(Json(GenerateResponse {
        accepted: outcome == SubmitOutcome::Completed,
        snapshot: controller.snapshot(),
    }))
}
