//! Application configuration.
//!
//! The generator endpoint defaults to the hosted service. Builds can point
//! the form somewhere else by setting `PROMPTGEN_ENDPOINT_URL` at compile
//! time (e.g. `PROMPTGEN_ENDPOINT_URL=http://localhost:8000/generate/ trunk serve`).

/// Hosted generator endpoint.
pub const DEFAULT_ENDPOINT_URL: &str = "https://system-prompt-generator.onrender.com/generate/";

/// Application name, used as the page title.
pub const APP_NAME: &str = "System Prompt Generator";

/// File name offered for the download when the response does not carry one.
pub const DEFAULT_DOWNLOAD_NAME: &str = "RecruitAI_System_Prompt.txt";

/// Settings injected into [`crate::UploadSubmitHandler`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadConfig {
    /// Absolute URL the multipart payload is posted to.
    pub endpoint_url: String,
}

impl UploadConfig {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
        }
    }

    /// Configuration baked in at build time, falling back to the hosted endpoint.
    pub fn from_build_env() -> Self {
        Self::new(option_env!("PROMPTGEN_ENDPOINT_URL").unwrap_or(DEFAULT_ENDPOINT_URL))
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT_URL)
    }
}
