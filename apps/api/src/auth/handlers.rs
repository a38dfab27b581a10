//! Login/logout redirects to the hosted identity provider.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::Redirect,
};
use tracing::{info, warn};

use crate::auth::{Identity, IdentityGate};
use crate::errors::AppError;
use crate::state::AppState;

/// Resolves the caller or fails with the provider's login URL attached.
pub fn require_identity(gate: &dyn IdentityGate, headers: &HeaderMap) -> Result<Identity, AppError> {
    gate.authenticate(headers).ok_or_else(|| {
        warn!("Unauthenticated request; sending caller to login");
        AppError::Unauthorized {
            login_url: gate.login_url(),
        }
    })
}

/// GET /auth/login
pub async fn handle_login(State(state): State<AppState>) -> Redirect {
    Redirect::to(&state.identity.login_url())
}

/// GET /auth/logout
///
/// Drops the caller's copilot session, then hands off to the provider with
/// `returnTo` set to this page's origin.
pub async fn handle_logout(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    if let Some(identity) = state.identity.authenticate(&headers) {
        state.sessions.clear(&identity.subject);
        info!("Cleared copilot session for {}", identity.subject);
    }
    Redirect::to(&state.identity.logout_url(&origin(&headers)))
}

fn origin(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    format!("{scheme}://{host}/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_origin_uses_host_and_forwarded_proto() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("copilot.example.com"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert_eq!(origin(&headers), "https://copilot.example.com/");
        assert_eq!(origin(&HeaderMap::new()), "http://localhost/");
    }
}
