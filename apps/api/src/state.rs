use std::sync::Arc;

use crate::auth::IdentityGate;
use crate::config::Config;
use crate::export::DocumentRenderer;
use crate::generation::session::SessionStore;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Completion backend. `OpenAiClient` in production, a stub in tests.
    pub llm: Arc<dyn CompletionClient>,
    pub identity: Arc<dyn IdentityGate>,
    pub renderer: Arc<dyn DocumentRenderer>,
    /// Per-identity form state. In memory only.
    pub sessions: Arc<SessionStore>,
}
