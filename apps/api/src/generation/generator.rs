//! Idea generation: runs one generate action for an authenticated user.
//!
//! Flow: build_request → session.begin → llm.complete → render → session.finish.
//!
//! The session lock is never held across the completion call. If the future is
//! dropped mid-call the in-flight guard clears the loading flag.

use chrono::Utc;
use serde::Deserialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::generation::builder::build_request;
use crate::generation::session::{GenerationOutcome, GenerationResult, SessionStore};
use crate::generation::variant::PromptVariant;
use crate::llm_client::CompletionClient;
use crate::models::UserProfile;
use crate::render::{render_html, RenderMode};

/// Request body for `POST /api/v1/copilot/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub variant: PromptVariant,
    #[serde(default)]
    pub profile: UserProfile,
}

/// Collaborators and settings a generation needs.
pub struct GenerationContext<'a> {
    pub sessions: &'a SessionStore,
    pub llm: &'a dyn CompletionClient,
    pub model: &'a str,
    pub render_mode: RenderMode,
}

/// Runs a generation for `subject` and records the outcome in its session.
///
/// Remote failures never escape as errors: they come back as
/// `GenerationOutcome::Failed` with the reason, after being logged.
pub async fn generate_ideas(
    ctx: &GenerationContext<'_>,
    subject: &str,
    request: GenerateRequest,
) -> GenerationOutcome {
    let completion = build_request(request.variant, &request.profile, ctx.model);

    info!(
        "Generating {} ideas for {} (prompt {} chars)",
        request.variant.as_str(),
        subject,
        completion.prompt.len()
    );
    let in_flight = ctx.sessions.begin(subject);

    let outcome = match ctx.llm.complete(&completion).await {
        Ok(raw) => {
            if raw.trim().is_empty() {
                warn!("Completion for {} returned blank content", subject);
            }
            let rendered = render_html(&raw, ctx.render_mode);
            GenerationOutcome::Ready(GenerationResult {
                id: Uuid::new_v4(),
                variant: request.variant,
                raw,
                rendered,
                generated_at: Utc::now(),
            })
        }
        Err(e) => {
            error!("Generation failed for {}: {e}", subject);
            GenerationOutcome::Failed {
                reason: e.to_string(),
            }
        }
    };

    in_flight.finish(&outcome);
    outcome
}
