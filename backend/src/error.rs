//! Error types for the prompt generation pipeline.
//!
//! - [`InputError`] - uploaded files that cannot be read
//! - [`FlowError`] - call flow parsing errors
//! - [`AiError`] - Gemini client errors
//! - [`GenerateError`] - top-level pipeline errors
//! - [`ServerError`] - HTTP layer errors
//!
//! Conversion is automatic via `From`, so `?` works across layers.

use thiserror::Error;

// =============================================================================
// Input Errors
// =============================================================================

/// Errors in the uploaded job files.
#[derive(Debug, Error)]
pub enum InputError {
    /// A required upload field is absent.
    #[error("Missing field: {0}")]
    MissingField(String),

    /// A required upload field was sent without content.
    #[error("Empty file for field: {0}")]
    EmptyFile(String),

    /// A JSON file could not be parsed.
    #[error("Invalid JSON in {field}: {message}")]
    InvalidJson { field: String, message: String },

    /// A key the prompt needs is absent from the job description.
    #[error("Missing key in {field}: {path}")]
    MissingKey { field: String, path: String },

    /// A key is present but its value has the wrong shape.
    #[error("Invalid value in {field}: {path}")]
    InvalidValue { field: String, path: String },

    /// Failed to read a file from disk.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Flow Errors
// =============================================================================

/// Errors while parsing a call flow file.
#[derive(Debug, Error)]
pub enum FlowError {
    /// The XML document is malformed.
    #[error("Invalid flow XML: {0}")]
    InvalidXml(String),
}

// =============================================================================
// AI Client Errors
// =============================================================================

/// Errors from the Gemini client.
#[derive(Debug, Error)]
pub enum AiError {
    /// Missing API key.
    #[error("Missing GOOGLE_API_KEY environment variable")]
    MissingApiKey,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    /// Error status reported by the API.
    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// Response body could not be decoded.
    #[error("Invalid JSON response: {0}")]
    InvalidJson(String),

    /// The model returned no text.
    #[error("Empty response from model")]
    EmptyResponse,
}

impl AiError {
    /// Transient failures worth another attempt: transport errors, 429 and 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            AiError::RequestFailed(_) => true,
            AiError::ApiError { status, .. } => *status == 429 || *status >= 500,
            AiError::MissingApiKey | AiError::InvalidJson(_) | AiError::EmptyResponse => false,
        }
    }
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors, returned by [`crate::pipeline::generate_prompt`].
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Input error.
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Flow parsing error.
    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    /// AI client error.
    #[error("AI error: {0}")]
    Ai(#[from] AiError),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Pipeline error.
    #[error("{0}")]
    Generate(#[from] GenerateError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for input handling.
pub type InputResult<T> = Result<T, InputError>;

/// Result type for flow parsing.
pub type FlowResult<T> = Result<T, FlowError>;

/// Result type for AI operations.
pub type AiResult<T> = Result<T, AiError>;

/// Result type for pipeline operations.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let input_err = InputError::MissingField("flow_file".into());
        let generate_err: GenerateError = input_err.into();
        assert!(generate_err.to_string().contains("flow_file"));

        let ai_err = AiError::ApiError {
            status: 429,
            message: "quota exceeded".into(),
        };
        let server_err: ServerError = GenerateError::from(ai_err).into();
        assert!(server_err.to_string().contains("quota exceeded"));
    }

    #[test]
    fn test_missing_key_format() {
        let err = InputError::MissingKey {
            field: "job_desc_file".into(),
            path: "recruitingContact.company".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("job_desc_file"));
        assert!(msg.contains("recruitingContact.company"));
    }
}
