//! API error type with HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Errors surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The uploaded bytes could not be parsed as a spreadsheet.
    #[error("could not process file")]
    Ingest(#[from] atrium_ingest::IngestError),

    /// No workbook has been uploaded yet.
    #[error("no workbook loaded")]
    NoWorkbook,

    /// No tree node exists at the requested path.
    #[error("no node at path {0}")]
    UnknownPath(String),

    /// No asset with the requested key under the given parent node.
    #[error("no asset {key} under {parent}")]
    AssetNotFound {
        /// Asset id or name the client asked for.
        key: String,
        /// Parent node path.
        parent: String,
    },

    /// The request body or parameters were malformed.
    #[error("{0}")]
    BadRequest(String),
}

/// Result alias for API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Ingest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NoWorkbook | Self::UnknownPath(_) | Self::AssetNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Ingest(source) => serde_json::json!({
                "error": self.to_string(),
                "detail": source.to_string(),
            }),
            _ => serde_json::json!({ "error": self.to_string() }),
        };
        tracing::debug!(%status, error = %self, "request failed");
        (status, Json(body)).into_response()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
