use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized { login_url: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized { login_url } => {
                let body = Json(json!({
                    "error": {
                        "code": "UNAUTHORIZED",
                        "message": "Authentication required",
                        "login_url": login_url
                    }
                }));
                return (StatusCode::UNAUTHORIZED, body).into_response();
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "NO_RESULT", msg.clone()),
            AppError::Generation(msg) => {
                tracing::error!("Generation error: {msg}");
                (StatusCode::BAD_GATEWAY, "GENERATION_FAILED", msg.clone())
            }
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "The document could not be generated".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                AppError::Unauthorized {
                    login_url: "https://id.example.com".into(),
                },
                StatusCode::UNAUTHORIZED,
            ),
            (AppError::Conflict("none".into()), StatusCode::CONFLICT),
            (AppError::Generation("timeout".into()), StatusCode::BAD_GATEWAY),
            (
                AppError::Export(ExportError::Pdf("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_error_body_codes() {
        let cases = [
            (AppError::Conflict("none".into()), "NO_RESULT"),
            (AppError::Generation("timeout".into()), "GENERATION_FAILED"),
            (AppError::Export(ExportError::Pdf("x".into())), "EXPORT_ERROR"),
        ];
        for (error, code) in cases {
            let bytes = axum::body::to_bytes(error.into_response().into_body(), usize::MAX)
                .await
                .unwrap();
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body["error"]["code"], code);
        }
    }
}
