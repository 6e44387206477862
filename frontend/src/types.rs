//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **Payload Types** - the four upload fields and the multipart payload
//! - **Response Types** - the binary artifact returned by the generator
//! - **UI Types** - submission phase
//! - **Error Types** - frontend error handling

use std::fmt;

// =============================================================================
// Payload Types
// =============================================================================

/// One of the four file inputs of the upload form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UploadField {
    /// Conversation flow diagram (XML or image)
    Flow,
    /// Example call script
    Example,
    /// Job description (JSON)
    JobDesc,
    /// Job details with screening questions (JSON)
    JobDetail,
}

impl UploadField {
    /// All fields, in the order they are appended to the payload.
    pub const ALL: [UploadField; 4] = [
        UploadField::Flow,
        UploadField::Example,
        UploadField::JobDesc,
        UploadField::JobDetail,
    ];

    /// Multipart field name expected by the generator.
    pub fn form_name(&self) -> &'static str {
        match self {
            UploadField::Flow => "flow_file",
            UploadField::Example => "example_file",
            UploadField::JobDesc => "job_desc_file",
            UploadField::JobDetail => "job_detail_file",
        }
    }

    /// DOM id of the matching `<input type="file">`.
    pub fn input_id(&self) -> &'static str {
        match self {
            UploadField::Flow => "flowFile",
            UploadField::Example => "exampleFile",
            UploadField::JobDesc => "jobDescFile",
            UploadField::JobDetail => "jobDetailFile",
        }
    }

    /// Human label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            UploadField::Flow => "Flow diagram",
            UploadField::Example => "Example script",
            UploadField::JobDesc => "Job description (JSON)",
            UploadField::JobDetail => "Job details (JSON)",
        }
    }

    /// `accept` attribute hint for the file picker.
    pub fn accept(&self) -> &'static str {
        match self {
            UploadField::Flow => ".xml,.png,.jpg",
            UploadField::Example => ".txt",
            UploadField::JobDesc | UploadField::JobDetail => ".json",
        }
    }
}

/// The four files of one submission, in fixed field order.
///
/// Every field is always present; `None` means the user picked nothing for
/// that input. Nothing is validated before sending.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadPayload<F> {
    entries: [(UploadField, Option<F>); 4],
}

impl<F> UploadPayload<F> {
    /// Build a payload by asking `select` for each field in order.
    pub fn collect(mut select: impl FnMut(UploadField) -> Option<F>) -> Self {
        Self {
            entries: UploadField::ALL.map(|field| (field, select(field))),
        }
    }

    /// Entries in append order.
    pub fn entries(&self) -> impl Iterator<Item = (UploadField, Option<&F>)> {
        self.entries.iter().map(|(field, file)| (*field, file.as_ref()))
    }

    /// Fields the user left empty.
    pub fn missing(&self) -> Vec<UploadField> {
        self.entries
            .iter()
            .filter(|(_, file)| file.is_none())
            .map(|(field, _)| *field)
            .collect()
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Body of a successful generator response, kept opaque.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseArtifact {
    /// Raw response bytes
    pub bytes: Vec<u8>,
    /// `Content-Type` header, if any
    pub content_type: Option<String>,
    /// File name from `Content-Disposition`, if any
    pub file_name: Option<String>,
}

impl ResponseArtifact {
    pub fn new(bytes: Vec<u8>, content_type: Option<String>, file_name: Option<String>) -> Self {
        Self {
            bytes,
            content_type,
            file_name,
        }
    }

    /// Name to put on the download anchor.
    pub fn download_name(&self) -> &str {
        self.file_name
            .as_deref()
            .unwrap_or(crate::DEFAULT_DOWNLOAD_NAME)
    }
}

// =============================================================================
// UI Types
// =============================================================================

/// Where a submission currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// Request sent, waiting for the body
    InFlight,
    /// Download link bound and shown
    Succeeded,
    /// Alert shown
    Failed,
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    /// The generator request failed: network error, non-2xx status or
    /// unreadable body.
    RequestFailed(String),
    /// A DOM/browser API call failed.
    Dom(String),
}

impl AppError {
    /// Bare message, without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            AppError::RequestFailed(msg) | AppError::Dom(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            AppError::Dom(msg) => write!(f, "DOM error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;
