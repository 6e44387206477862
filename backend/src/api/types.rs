//! REST API response bodies.
//!
//! Successful generations are returned as a plain-text attachment; only
//! errors and the health check use JSON.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AiError, GenerateError, InputError, ServerError};
use crate::inputs::FIELDS;

/// Health check document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub model: String,
    pub fields: Vec<String>,
}

impl HealthResponse {
    pub fn ok(model: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: "promptgen".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            model: model.to_string(),
            fields: FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// JSON error body
pub fn error_response(message: &str) -> Value {
    json!({
        "status": "error",
        "error": message
    })
}

/// `Content-Disposition` value for a downloaded file
pub fn attachment(file_name: &str) -> String {
    format!("attachment; filename=\"{}\"", file_name.replace('"', ""))
}

impl ServerError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Generate(GenerateError::Input(e)) => match e {
                InputError::MissingField(_) | InputError::EmptyFile(_) => StatusCode::BAD_REQUEST,
                InputError::InvalidJson { .. }
                | InputError::MissingKey { .. }
                | InputError::InvalidValue { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                InputError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::Generate(GenerateError::Flow(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Generate(GenerateError::Ai(AiError::MissingApiKey)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServerError::Generate(GenerateError::Ai(_)) => StatusCode::BAD_GATEWAY,
        }
    }
}
