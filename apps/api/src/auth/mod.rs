//! Identity gate, the only thing the copilot knows about authentication.
//!
//! Login and logout are delegated to a hosted identity provider; its OAuth/OIDC
//! flow and token storage are opaque here. The gate answers one question
//! ("who is calling, if anyone?") and hands out the provider's redirect URLs.

pub mod handlers;

use std::collections::HashMap;

use axum::http::{header, HeaderMap};

use crate::config::Config;

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
}

/// Carried in `AppState` as `Arc<dyn IdentityGate>`.
pub trait IdentityGate: Send + Sync {
    /// `Some` when the request carries valid provider credentials.
    fn authenticate(&self, headers: &HeaderMap) -> Option<Identity>;

    fn is_authenticated(&self, headers: &HeaderMap) -> bool {
        self.authenticate(headers).is_some()
    }

    /// Where to send the browser to start the provider's login flow.
    fn login_url(&self) -> String;

    /// Where to send the browser to end the provider session.
    fn logout_url(&self, return_to: &str) -> String;
}

/// Gate backed by a hosted login page and tokens issued by that provider.
///
/// Credentials are read from `Authorization: Bearer <token>` or a `session`
/// cookie and looked up in the configured token table.
pub struct HostedLoginGate {
    login_url: String,
    logout_url: String,
    tokens: HashMap<String, String>,
}

impl HostedLoginGate {
    pub fn new(config: &Config) -> Self {
        Self {
            login_url: config.auth_login_url.clone(),
            logout_url: config.auth_logout_url.clone(),
            tokens: config.auth_tokens.clone(),
        }
    }
}

impl IdentityGate for HostedLoginGate {
    fn authenticate(&self, headers: &HeaderMap) -> Option<Identity> {
        let token = bearer_token(headers).or_else(|| session_cookie(headers))?;
        self.tokens.get(token).map(|subject| Identity {
            subject: subject.clone(),
        })
    }

    fn login_url(&self) -> String {
        self.login_url.clone()
    }

    fn logout_url(&self, return_to: &str) -> String {
        let separator = if self.logout_url.contains('?') { '&' } else { '?' };
        format!(
            "{}{}returnTo={}",
            self.logout_url,
            separator,
            encode_query_value(return_to)
        )
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub(crate) fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())?
        .split(';')
        .find_map(|c| c.trim().strip_prefix("session="))
        .filter(|t| !t.is_empty())
}

fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn gate() -> HostedLoginGate {
        HostedLoginGate::new(&Config::for_tests("http://unused"))
    }

    #[test]
    fn test_missing_credentials_are_unauthenticated() {
        assert!(!gate().is_authenticated(&HeaderMap::new()));
    }

    #[test]
    fn test_bearer_token_authenticates() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok-alice"));
        assert_eq!(
            gate().authenticate(&headers),
            Some(Identity {
                subject: "alice".to_string()
            })
        );
    }

    #[test]
    fn test_session_cookie_authenticates() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark; session=tok-alice"));
        assert!(gate().is_authenticated(&headers));
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok-mallory"));
        assert!(!gate().is_authenticated(&headers));
    }

    #[test]
    fn test_logout_url_carries_encoded_return_to() {
        assert_eq!(
            gate().logout_url("http://localhost:8080/"),
            "https://id.example.com/v2/logout?returnTo=http%3A%2F%2Flocalhost%3A8080%2F"
        );
    }
}
