// Document export: turns the current generation result into a downloadable file.
// PDF goes through DocumentDefinition + a DocumentRenderer; HTML is written as-is.

pub mod definition;
pub mod handlers;
pub mod pdf;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::generation::session::GenerationResult;

pub use definition::DocumentDefinition;
pub use pdf::PdfRenderer;

pub const PDF_FILE_NAME: &str = "exported-content.pdf";
pub const HTML_FILE_NAME: &str = "result.html";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("Export task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Pdf,
    Html,
}

/// Lays a document definition out as file bytes.
///
/// Carried in `AppState` as `Arc<dyn DocumentRenderer>`; called from a blocking task.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, definition: &DocumentDefinition) -> Result<Vec<u8>, ExportError>;
}

#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Exports `result` in `format`. PDF renders the displayed markup; HTML
/// downloads the displayed markup unchanged.
pub async fn export_result(
    result: &GenerationResult,
    format: ExportFormat,
    renderer: Arc<dyn DocumentRenderer>,
) -> Result<ExportedFile, ExportError> {
    let file = match format {
        ExportFormat::Html => ExportedFile {
            file_name: HTML_FILE_NAME,
            content_type: "text/html; charset=utf-8",
            bytes: result.rendered.clone().into_bytes(),
        },
        ExportFormat::Pdf => {
            let definition = DocumentDefinition::from_html(&result.rendered);
            if definition.is_empty() {
                warn!("Result {} has no printable text; exporting a blank page", result.id);
            }
            let bytes =
                tokio::task::spawn_blocking(move || renderer.render(&definition)).await??;
            ExportedFile {
                file_name: PDF_FILE_NAME,
                content_type: "application/pdf",
                bytes,
            }
        }
    };

    info!(
        "Exported result {} as {} ({} bytes)",
        result.id,
        file.file_name,
        file.bytes.len()
    );
    Ok(file)
}
