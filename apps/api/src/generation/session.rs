//! Per-identity copilot session: the form's loading flag, last result and last error.
//!
//! State machine:
//! `Idle → begin() → Loading → finish(Ready) → Idle-with-Result`
//! `Loading → finish(Failed) → Idle-with-Error` (previous result kept).
//!
//! The loading flag is advisory. A second `begin()` while loading is allowed;
//! whichever call finishes last wins. A generation dropped before it finishes
//! (client disconnect, aborted task) releases its share of the loading flag
//! through `InFlight`'s `Drop`.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::generation::variant::PromptVariant;

/// A completed generation. `raw` is the model's content byte-for-byte;
/// `rendered` is what the page displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationResult {
    pub id: Uuid,
    pub variant: PromptVariant,
    pub raw: String,
    pub rendered: String,
    pub generated_at: DateTime<Utc>,
}

impl GenerationResult {
    /// Export needs something visible: sanitizing can empty a non-empty answer.
    pub fn is_exportable(&self) -> bool {
        !self.rendered.is_empty()
    }
}

/// Explicit outcome of one generate action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationOutcome {
    Ready(GenerationResult),
    Failed { reason: String },
}

#[derive(Debug, Clone, Default)]
pub struct CopilotSession {
    loading: bool,
    in_flight: u32,
    result: Option<GenerationResult>,
    last_error: Option<String>,
}

impl CopilotSession {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Export is offered only once a non-empty result exists.
    pub fn can_export(&self) -> bool {
        self.result.as_ref().is_some_and(GenerationResult::is_exportable)
    }

    pub fn begin(&mut self) {
        self.loading = true;
        self.in_flight += 1;
        self.last_error = None;
    }

    pub fn finish(&mut self, outcome: &GenerationOutcome) {
        self.release();
        match outcome {
            GenerationOutcome::Ready(result) => {
                self.result = Some(result.clone());
                self.last_error = None;
            }
            GenerationOutcome::Failed { reason } => {
                self.last_error = Some(reason.clone());
            }
        }
    }

    /// Ends a generation that produced no outcome. Result and error are kept.
    pub fn abandon(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.loading = self.in_flight > 0;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            loading: self.is_loading(),
            has_result: self.result().is_some(),
            can_export: self.can_export(),
            result: self.result().cloned(),
            error: self.last_error().map(str::to_string),
        }
    }
}

/// What `GET /api/v1/copilot/state` returns.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub loading: bool,
    pub has_result: bool,
    pub can_export: bool,
    pub result: Option<GenerationResult>,
    pub error: Option<String>,
}

/// Sessions keyed by identity subject. In memory only; dropped on logout or exit.
///
/// The lock is synchronous and never held across an await, so `InFlight` can
/// release a session from `Drop`.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, CopilotSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `subject` as loading until the returned guard is finished or dropped.
    pub fn begin(&self, subject: &str) -> InFlight<'_> {
        self.with_session(subject, CopilotSession::begin);
        InFlight {
            store: self,
            subject: subject.to_string(),
            finished: false,
        }
    }

    pub fn snapshot(&self, subject: &str) -> SessionSnapshot {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(subject)
            .map(CopilotSession::snapshot)
            .unwrap_or_else(|| CopilotSession::default().snapshot())
    }

    pub fn result(&self, subject: &str) -> Option<GenerationResult> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(subject)
            .and_then(|s| s.result().cloned())
    }

    pub fn clear(&self, subject: &str) {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(subject);
    }

    fn with_session(&self, subject: &str, f: impl FnOnce(&mut CopilotSession)) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        f(sessions.entry(subject.to_string()).or_default());
    }
}

/// One running generation. `finish` records its outcome; dropping it
/// unfinished only clears its share of the loading flag.
#[must_use = "dropping the guard ends the generation without an outcome"]
pub struct InFlight<'a> {
    store: &'a SessionStore,
    subject: String,
    finished: bool,
}

impl InFlight<'_> {
    pub fn finish(mut self, outcome: &GenerationOutcome) {
        self.finished = true;
        self.store
            .with_session(&self.subject, |session| session.finish(outcome));
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            warn!("Generation for {} was dropped before it finished", self.subject);
            self.store.with_session(&self.subject, CopilotSession::abandon);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(raw: &str) -> GenerationOutcome {
        GenerationOutcome::Ready(GenerationResult {
            id: Uuid::new_v4(),
            variant: PromptVariant::Ideas,
            raw: raw.to_string(),
            rendered: raw.to_string(),
            generated_at: Utc::now(),
        })
    }

    #[test]
    fn test_new_session_is_idle_without_export() {
        let session = CopilotSession::default();
        assert!(!session.is_loading());
        assert!(session.result().is_none());
        assert!(!session.can_export());
    }

    #[test]
    fn test_ready_outcome_enables_export() {
        let mut session = CopilotSession::default();
        session.begin();
        assert!(session.is_loading());
        assert!(!session.can_export());

        session.finish(&ready("<table>...</table>"));

        assert!(!session.is_loading());
        assert!(session.can_export());
        assert_eq!(session.result().unwrap().raw, "<table>...</table>");
    }

    #[test]
    fn test_empty_result_does_not_enable_export() {
        let mut session = CopilotSession::default();
        session.begin();
        session.finish(&ready(""));
        assert!(!session.can_export());
    }

    #[test]
    fn test_failure_clears_loading_and_keeps_previous_result() {
        let mut session = CopilotSession::default();
        session.begin();
        session.finish(&ready("<p>first</p>"));

        session.begin();
        session.finish(&GenerationOutcome::Failed {
            reason: "HTTP error: timed out".to_string(),
        });

        assert!(!session.is_loading());
        assert_eq!(session.last_error(), Some("HTTP error: timed out"));
        assert_eq!(session.result().unwrap().raw, "<p>first</p>");
    }

    #[test]
    fn test_sanitized_away_result_does_not_enable_export() {
        let mut session = CopilotSession::default();
        session.begin();
        session.finish(&GenerationOutcome::Ready(GenerationResult {
            id: Uuid::new_v4(),
            variant: PromptVariant::Ideas,
            raw: "<script>alert(1)</script>".to_string(),
            rendered: String::new(),
            generated_at: Utc::now(),
        }));
        assert!(session.result().is_some());
        assert!(!session.can_export());
    }

    #[test]
    fn test_failure_on_fresh_session_sets_no_result() {
        let mut session = CopilotSession::default();
        session.begin();
        session.finish(&GenerationOutcome::Failed {
            reason: "boom".to_string(),
        });
        assert!(!session.is_loading());
        assert!(session.result().is_none());
        assert!(!session.can_export());
    }

    #[test]
    fn test_overlapping_generations_stay_loading_until_both_finish() {
        let mut session = CopilotSession::default();
        session.begin();
        session.begin();
        session.finish(&ready("<p>a</p>"));
        assert!(session.is_loading());
        session.finish(&ready("<p>b</p>"));
        assert!(!session.is_loading());
        assert_eq!(session.result().unwrap().raw, "<p>b</p>");
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(GenerationOutcome::Failed {
            reason: "no content".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"], "no content");
    }

    #[test]
    fn test_store_isolates_subjects_and_clears() {
        let store = SessionStore::new();
        store.begin("alice").finish(&ready("<p>alice</p>"));

        assert!(store.snapshot("alice").can_export);
        assert!(!store.snapshot("bob").can_export);

        store.clear("alice");
        assert!(store.result("alice").is_none());
    }

    #[test]
    fn test_dropped_guard_releases_loading_and_keeps_result() {
        let store = SessionStore::new();
        store.begin("alice").finish(&ready("<p>first</p>"));

        let guard = store.begin("alice");
        assert!(store.snapshot("alice").loading);
        drop(guard);

        let snapshot = store.snapshot("alice");
        assert!(!snapshot.loading);
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.result.unwrap().raw, "<p>first</p>");
    }

    #[test]
    fn test_dropped_guard_does_not_end_an_overlapping_generation() {
        let store = SessionStore::new();
        let first = store.begin("alice");
        let second = store.begin("alice");
        drop(first);
        assert!(store.snapshot("alice").loading);
        second.finish(&ready("<p>b</p>"));
        assert!(!store.snapshot("alice").loading);
    }
}
