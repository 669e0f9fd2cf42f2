//! Errors surfaced to HTTP callers.
//!
//! Adapters (stores, generators) speak `anyhow`; everything that crosses the
//! handler boundary is one of these variants, each with a fixed status code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// A required field is missing or invalid. Caller's fault.
    #[error("{0}")]
    Validation(String),

    /// A target reference resolved to nothing.
    #[error("{0}")]
    NotFound(String),

    /// Model output was not valid structured data.
    #[error("could not parse model output: {0}")]
    Parse(String),

    /// The text-generation call failed or returned nothing usable.
    #[error("text generation failed: {0:#}")]
    Upstream(anyhow::Error),

    /// A persistence operation failed.
    #[error("store error: {0:#}")]
    Store(anyhow::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Parse(_) | Self::Upstream(_) | Self::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable tag for the error body.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Parse(_) => "parse",
            Self::Upstream(_) => "upstream",
            Self::Store(_) => "store",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), "{message}");
        } else {
            tracing::warn!(kind = self.kind(), "{message}");
        }
        let body = json!({ "error": message, "kind": self.kind() });
        (status, Json(body)).into_response()
    }
}
