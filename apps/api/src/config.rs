use std::collections::HashMap;

use anyhow::{bail, Context, Result};

use crate::render::RenderMode;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub llm_timeout_secs: u64,
    pub render_mode: RenderMode,
    pub auth_login_url: String,
    pub auth_logout_url: String,
    /// Bearer token -> subject. Issued by the hosted identity provider.
    pub auth_tokens: HashMap<String, String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            model: std::env::var("COPILOT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            llm_timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            render_mode: std::env::var("RENDER_MODE")
                .unwrap_or_else(|_| "sanitized".to_string())
                .parse::<RenderMode>()?,
            auth_login_url: require_env("AUTH_LOGIN_URL")?,
            auth_logout_url: require_env("AUTH_LOGOUT_URL")?,
            auth_tokens: parse_auth_tokens(&std::env::var("AUTH_TOKENS").unwrap_or_default())?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Parses `subject:token,subject:token` into a token -> subject map.
fn parse_auth_tokens(raw: &str) -> Result<HashMap<String, String>> {
    let mut tokens = HashMap::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((subject, token)) = pair.split_once(':') else {
            bail!("AUTH_TOKENS entry '{pair}' must look like 'subject:token'");
        };
        let (subject, token) = (subject.trim(), token.trim());
        if subject.is_empty() || token.is_empty() {
            bail!("AUTH_TOKENS entry '{pair}' has an empty subject or token");
        }
        tokens.insert(token.to_string(), subject.to_string());
    }
    Ok(tokens)
}

#[cfg(test)]
impl Config {
    /// Config for unit tests; points the completion client at `base_url`.
    pub fn for_tests(base_url: &str) -> Self {
        Config {
            openai_api_key: "sk-test".to_string(),
            openai_base_url: base_url.to_string(),
            model: DEFAULT_MODEL.to_string(),
            llm_timeout_secs: 5,
            render_mode: RenderMode::Sanitized,
            auth_login_url: "https://id.example.com/authorize".to_string(),
            auth_logout_url: "https://id.example.com/v2/logout".to_string(),
            auth_tokens: HashMap::from([("tok-alice".to_string(), "alice".to_string())]),
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
