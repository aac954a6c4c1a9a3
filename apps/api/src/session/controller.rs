//! Session Controller — owns one user's session state and orchestrates the
//! generation pipeline: profile → prompt builder → generation backend →
//! response parser.
//!
//! State transitions: Idle → Generating → Ready | Failed → Generating (on
//! the next submit/regenerate). A submit while Generating is a no-op; there
//! is no queueing and never more than one in-flight generation per session.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{error, info};

use crate::analytics::AnalyticsSink;
use crate::errors::AppError;
use crate::generation::builder::build_prompt;
use crate::generation::parser::{parse, ParsedBlock};
use crate::llm_client::{Citation, GenerationBackend, GenerationResult};
use crate::models::profile::{LearningFormat, Profile};

/// Mutable session state. Single-writer: only the owning controller touches
/// it, and only while holding the lock.
#[derive(Debug, Default)]
struct SessionState {
    profile: Profile,
    last_result: Option<GenerationResult>,
    is_generating: bool,
    error: Option<String>,
}

/// What a submit/regenerate call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The generation ran to completion (success or failure — see the
    /// snapshot for which).
    Completed,
    /// Another generation was already in flight; the call was ignored.
    AlreadyGenerating,
}

/// Read-only view of a session, served to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub profile: Profile,
    pub is_generating: bool,
    pub error: Option<String>,
    pub drop: Option<DropView>,
}

/// A parsed Learning Drop plus its grounding citations.
#[derive(Debug, Clone, Serialize)]
pub struct DropView {
    pub blocks: Vec<ParsedBlock>,
    pub sources: Vec<Citation>,
}

pub struct SessionController {
    state: Mutex<SessionState>,
    backend: Arc<dyn GenerationBackend>,
    analytics: AnalyticsSink,
}

impl SessionController {
    pub fn new(profile: Profile, backend: Arc<dyn GenerationBackend>, analytics: AnalyticsSink) -> Self {
        Self {
            state: Mutex::new(SessionState {
                profile,
                ..SessionState::default()
            }),
            backend,
            analytics,
        }
    }

    /// Generates a fresh Learning Drop from the current profile.
    pub async fn submit(&self) -> SubmitOutcome {
        self.run_generation(false).await
    }

    /// Like `submit`, but feeds the last successful raw message back into
    /// the prompt so the model is told to produce a disjoint set.
    pub async fn regenerate(&self) -> SubmitOutcome {
        self.run_generation(true).await
    }

    async fn run_generation(&self, with_previous: bool) -> SubmitOutcome {
        // Guard, state reset, and prompt construction under one lock hold.
        // The lock is NOT held across the backend await — the Generating
        // flag is what blocks concurrent submissions.
        let prompt = {
            let mut state = self.lock();
            if state.is_generating {
                info!("Ignoring submit: generation already in flight");
                return SubmitOutcome::AlreadyGenerating;
            }
            let previous = if with_previous {
                state.last_result.as_ref().map(|r| r.message.clone())
            } else {
                None
            };
            state.is_generating = true;
            state.error = None;
            state.last_result = None;
            build_prompt(&state.profile, previous.as_deref())
        };

        let outcome = self.backend.generate(&prompt).await;

        let mut state = self.lock();
        state.is_generating = false;
        match outcome {
            Ok(result) => {
                info!(
                    "Learning drop generated: {} chars, {} sources",
                    result.message.len(),
                    result.sources.len()
                );
                self.analytics.record(&state.profile, &result);
                state.last_result = Some(result);
            }
            Err(e) => {
                let app_error = AppError::from(e);
                error!("Learning drop generation failed: {app_error}");
                state.error = Some(app_error.user_message());
            }
        }
        SubmitOutcome::Completed
    }

    /// Replaces one profile field by name. Unknown names and unparseable
    /// enum values are rejected.
    pub fn update_field(&self, field: &str, value: &str) -> Result<Profile, AppError> {
        let mut state = self.lock();
        if state.profile.set_field(field, value) {
            Ok(state.profile.clone())
        } else {
            Err(AppError::Validation(format!(
                "Unknown or invalid profile field '{field}'"
            )))
        }
    }

    /// Adds the format preference if absent, removes it if present.
    pub fn toggle_preference(&self, format: LearningFormat) -> Profile {
        let mut state = self.lock();
        state.profile.toggle_preference(format);
        state.profile.clone()
    }

    /// Current state, with the raw message parsed into renderable blocks.
    /// Parsing is pure and deterministic, so re-parsing per snapshot is safe.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock();
        SessionSnapshot {
            profile: state.profile.clone(),
            is_generating: state.is_generating,
            error: state.error.clone(),
            drop: state.last_result.as_ref().map(|result| DropView {
                blocks: parse(&result.message),
                sources: result.sources.clone(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        // A poisoned lock only means a panic mid-update elsewhere; the state
        // is plain data, so continue with it rather than propagating.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
