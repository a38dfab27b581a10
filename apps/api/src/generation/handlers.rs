//! Axum route handlers for the copilot generate flow.

use axum::{extract::State, http::HeaderMap, Json};

use crate::auth::handlers::require_identity;
use crate::errors::AppError;
use crate::generation::generator::{generate_ideas, GenerateRequest, GenerationContext};
use crate::generation::session::{GenerationOutcome, GenerationResult, SessionSnapshot};
use crate::generation::variant::{PromptVariant, VariantDescriptor};
use crate::state::AppState;

/// POST /api/v1/copilot/generate
///
/// Unauthenticated callers get a 401 carrying the provider's login URL and the
/// completion endpoint is never called. Remote failures come back as 502 with
/// the reason; the session's loading flag is cleared either way.
pub async fn handle_generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerationResult>, AppError> {
    let identity = require_identity(state.identity.as_ref(), &headers)?;

    let ctx = GenerationContext {
        sessions: &state.sessions,
        llm: state.llm.as_ref(),
        model: &state.config.model,
        render_mode: state.config.render_mode,
    };

    match generate_ideas(&ctx, &identity.subject, request).await {
        GenerationOutcome::Ready(result) => Ok(Json(result)),
        GenerationOutcome::Failed { reason } => Err(AppError::Generation(reason)),
    }
}

/// GET /api/v1/copilot/state
pub async fn handle_get_state(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SessionSnapshot>, AppError> {
    let identity = require_identity(state.identity.as_ref(), &headers)?;
    Ok(Json(state.sessions.snapshot(&identity.subject)))
}

/// GET /api/v1/variants
pub async fn handle_list_variants() -> Json<Vec<VariantDescriptor>> {
    Json(PromptVariant::ALL.into_iter().map(VariantDescriptor::from).collect())
}
