//! Axum route handler for document export.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::auth::handlers::require_identity;
use crate::errors::AppError;
use crate::export::{export_result, ExportFormat};
use crate::generation::session::GenerationResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ExportRequest {
    /// Defaults to the format of the variant that produced the result.
    #[serde(default)]
    pub format: Option<ExportFormat>,
}

/// POST /api/v1/copilot/export
///
/// 409 until the session holds a result with visible markup.
pub async fn handle_export(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Option<Json<ExportRequest>>,
) -> Result<impl IntoResponse, AppError> {
    let identity = require_identity(state.identity.as_ref(), &headers)?;
    let request = request.map(|Json(r)| r).unwrap_or_default();

    let result = state
        .sessions
        .result(&identity.subject)
        .filter(GenerationResult::is_exportable)
        .ok_or_else(|| AppError::Conflict("Generate ideas before exporting".to_string()))?;

    let format = request.format.unwrap_or(result.variant.default_export());
    let file = export_result(&result, format, state.renderer.clone()).await?;

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.bytes,
    ))
}
