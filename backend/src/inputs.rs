//! The four uploaded files of a generation request.

use std::fs;
use std::path::Path;

use crate::error::{InputError, InputResult};

/// Multipart field carrying the call flow (XML or image).
pub const FLOW_FIELD: &str = "flow_file";
/// Multipart field carrying the example script.
pub const EXAMPLE_FIELD: &str = "example_file";
/// Multipart field carrying the job description JSON.
pub const JOB_DESC_FIELD: &str = "job_desc_file";
/// Multipart field carrying the job details JSON.
pub const JOB_DETAIL_FIELD: &str = "job_detail_file";

/// All field names, in upload order.
pub const FIELDS: [&str; 4] = [FLOW_FIELD, EXAMPLE_FIELD, JOB_DESC_FIELD, JOB_DETAIL_FIELD];

/// One uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Multipart field name
    pub field: String,
    /// Client-side file name, if sent
    pub file_name: Option<String>,
    /// Raw content
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(field: impl Into<String>, file_name: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            field: field.into(),
            file_name,
            bytes,
        }
    }

    /// Read a file from disk, keeping its file name.
    pub fn from_path(field: &str, path: &Path) -> InputResult<Self> {
        let bytes = fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string());
        Ok(Self::new(field, file_name, bytes))
    }

    /// File name or an empty string.
    pub fn name(&self) -> &str {
        self.file_name.as_deref().unwrap_or("")
    }
}

/// The complete set of files a generation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateInputs {
    pub flow: UploadedFile,
    pub example: UploadedFile,
    pub job_desc: UploadedFile,
    pub job_detail: UploadedFile,
}

impl GenerateInputs {
    /// Assemble inputs from loose uploads, requiring each field with content.
    ///
    /// Unknown fields are ignored; when a field repeats, the last one wins.
    pub fn from_uploads(uploads: impl IntoIterator<Item = UploadedFile>) -> InputResult<Self> {
        let mut flow = None;
        let mut example = None;
        let mut job_desc = None;
        let mut job_detail = None;

        for upload in uploads {
            let slot = match upload.field.as_str() {
                FLOW_FIELD => &mut flow,
                EXAMPLE_FIELD => &mut example,
                JOB_DESC_FIELD => &mut job_desc,
                JOB_DETAIL_FIELD => &mut job_detail,
                _ => continue,
            };
            *slot = Some(upload);
        }

        Ok(Self {
            flow: require(flow, FLOW_FIELD)?,
            example: require(example, EXAMPLE_FIELD)?,
            job_desc: require(job_desc, JOB_DESC_FIELD)?,
            job_detail: require(job_detail, JOB_DETAIL_FIELD)?,
        })
    }

    /// Load the four files from disk (CLI).
    pub fn from_paths(flow: &Path, example: &Path, job_desc: &Path, job_detail: &Path) -> InputResult<Self> {
        Self::from_uploads([
            UploadedFile::from_path(FLOW_FIELD, flow)?,
            UploadedFile::from_path(EXAMPLE_FIELD, example)?,
            UploadedFile::from_path(JOB_DESC_FIELD, job_desc)?,
            UploadedFile::from_path(JOB_DETAIL_FIELD, job_detail)?,
        ])
    }
}

fn require(upload: Option<UploadedFile>, field: &str) -> InputResult<UploadedFile> {
    let upload = upload.ok_or_else(|| InputError::MissingField(field.to_string()))?;
    // A browser sends an empty text part when no file was picked
    if upload.bytes.is_empty() && upload.file_name.as_deref().unwrap_or("").is_empty() {
        return Err(InputError::EmptyFile(field.to_string()));
    }
    Ok(upload)
}
