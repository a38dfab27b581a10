/// LLM client: the single point of entry for chat-completion calls in the copilot.
///
/// No other module talks to the completion endpoint directly. Handlers depend on
/// the `CompletionClient` trait so tests can swap in a stub without touching
/// configuration or the network.
///
/// One call per generate click: no retries, no rate-limit handling.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::config::Config;

pub mod prompts;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Everything needed for one completion call. Built fresh per generate action.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    /// `None` leaves the endpoint's default temperature in place.
    pub temperature: Option<f32>,
}

/// The completion seam. `Arc<dyn CompletionClient>` lives in `AppState`.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the text of the first choice.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Content of the first choice, exactly as returned.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completions client for OpenAI-compatible endpoints.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl OpenAiClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.llm_timeout_secs))
                .build()?,
            api_key: config.openai_api_key.clone(),
            endpoint: format!(
                "{}/chat/completions",
                config.openai_base_url.trim_end_matches('/')
            ),
        })
    }

    /// Makes the raw call, returning the full response object.
    pub async fn call(&self, request: &CompletionRequest) -> Result<ChatResponse, LlmError> {
        let body = ChatRequest {
            model: &request.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Error with completion API request: {e}");
                LlmError::Http(e)
            })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!("Completion API returned {}: {}", status, text);
            let message = serde_json::from_str::<ApiErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = serde_json::from_str(&text)?;

        if let Some(usage) = &chat.usage {
            debug!(
                "Completion succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let response = self.call(request).await?;
        response
            .first_content()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    /// Spins up a fake completion endpoint and returns its base URL.
    async fn spawn_endpoint(status: StatusCode, reply: Value, seen: Arc<Mutex<Vec<Value>>>) -> String {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |Json(body): Json<Value>| {
                let seen = seen.clone();
                let reply = reply.clone();
                async move {
                    seen.lock().unwrap().push(body);
                    (status, Json(reply))
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1")
    }

    fn request(temperature: Option<f32>) -> CompletionRequest {
        CompletionRequest {
            model: "gpt-3.5-turbo".to_string(),
            prompt: "Task: Generate business ideas".to_string(),
            temperature,
        }
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice_content_verbatim() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let base = spawn_endpoint(
            StatusCode::OK,
            json!({"choices": [{"message": {"role": "assistant", "content": "<table>...</table>"}}]}),
            seen.clone(),
        )
        .await;
        let client = OpenAiClient::new(&Config::for_tests(&base)).unwrap();

        let content = client.complete(&request(Some(0.0))).await.unwrap();

        assert_eq!(content, "<table>...</table>");
        let bodies = seen.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["model"], "gpt-3.5-turbo");
        assert_eq!(bodies[0]["temperature"], 0.0);
        assert_eq!(bodies[0]["messages"][0]["role"], "user");
        assert_eq!(bodies[0]["messages"][0]["content"], "Task: Generate business ideas");
    }

    #[tokio::test]
    async fn test_temperature_is_omitted_when_unset() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let base = spawn_endpoint(
            StatusCode::OK,
            json!({"choices": [{"message": {"content": "<p>ok</p>"}}]}),
            seen.clone(),
        )
        .await;
        let client = OpenAiClient::new(&Config::for_tests(&base)).unwrap();

        client.complete(&request(None)).await.unwrap();

        assert!(seen.lock().unwrap()[0].get("temperature").is_none());
    }

    #[tokio::test]
    async fn test_api_error_message_is_extracted() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let base = spawn_endpoint(
            StatusCode::UNAUTHORIZED,
            json!({"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}),
            seen,
        )
        .await;
        let client = OpenAiClient::new(&Config::for_tests(&base)).unwrap();

        let err = client.complete(&request(Some(0.0))).await.unwrap_err();

        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_choices_is_empty_content() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let base = spawn_endpoint(StatusCode::OK, json!({"choices": []}), seen).await;
        let client = OpenAiClient::new(&Config::for_tests(&base)).unwrap();

        let err = client.complete(&request(Some(0.0))).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_transport_failure_is_http_error() {
        // Nothing listens on port 9 of localhost in the test environment.
        let client = OpenAiClient::new(&Config::for_tests("http://127.0.0.1:9/v1")).unwrap();
        let err = client.complete(&request(Some(0.0))).await.unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
    }
}
