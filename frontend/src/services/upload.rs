//! HTTP transport posting the four upload files to the generator.

use gloo_net::http::{Request, Response};
use serde::Deserialize;
use web_sys::{File, FormData};

use crate::types::{AppError, AppResult, ResponseArtifact, UploadPayload};

/// Message used for every non-2xx answer.
pub const GENERATION_FAILED: &str = "Failed to generate prompt";

/// Sends one payload and returns the raw response body.
///
/// No timeout, retry or cancellation: one call, one request.
#[allow(async_fn_in_trait)]
pub trait UploadTransport {
    /// File handle carried by the payload.
    type File;

    async fn post(
        &self,
        endpoint_url: &str,
        payload: UploadPayload<Self::File>,
    ) -> AppResult<ResponseArtifact>;
}

/// Browser `fetch` transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl FetchTransport {
    pub fn new() -> Self {
        Self
    }
}

impl UploadTransport for FetchTransport {
    type File = File;

    async fn post(
        &self,
        endpoint_url: &str,
        payload: UploadPayload<File>,
    ) -> AppResult<ResponseArtifact> {
        let form_data = build_form_data(&payload)?;

        let request = Request::post(endpoint_url)
            .body(form_data)
            .map_err(|e| AppError::RequestFailed(format!("Failed to build request: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| AppError::RequestFailed(e.to_string()))?;

        if !response.ok() {
            log_server_error(response).await;
            return Err(AppError::RequestFailed(GENERATION_FAILED.to_string()));
        }

        let content_type = response.headers().get("content-type");
        let file_name = response
            .headers()
            .get("content-disposition")
            .as_deref()
            .and_then(filename_from_content_disposition);

        let bytes = response
            .binary()
            .await
            .map_err(|e| AppError::RequestFailed(format!("Failed to read response: {}", e)))?;

        log::info!("Generator answered with {} bytes", bytes.len());

        Ok(ResponseArtifact::new(bytes, content_type, file_name))
    }
}

/// Append the four fields in order. An empty input becomes an empty text part.
fn build_form_data(payload: &UploadPayload<File>) -> AppResult<FormData> {
    let form_data = FormData::new()
        .map_err(|e| AppError::RequestFailed(format!("Failed to create FormData: {:?}", e)))?;

    for (field, file) in payload.entries() {
        let appended = match file {
            Some(file) => form_data.append_with_blob(field.form_name(), file),
            None => form_data.append_with_str(field.form_name(), ""),
        };
        appended.map_err(|e| {
            AppError::RequestFailed(format!("Failed to append {}: {:?}", field.form_name(), e))
        })?;
    }

    Ok(form_data)
}

/// Error document returned by the generator service.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Console-only detail for a failed request; the user sees the generic message.
async fn log_server_error(response: Response) {
    let status = response.status();
    let detail = match response.text().await {
        Ok(text) => serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text),
        Err(_) => "unreadable body".to_string(),
    };
    log::warn!("Generator returned {}: {}", status, detail);
}

/// Extract the file name from a `Content-Disposition` header value.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for param in header.split(';').map(str::trim) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename" => plain = Some(value.trim().trim_matches('"').to_string()),
            "filename*" => {
                // RFC 5987: charset'lang'value
                let value = value.trim();
                let name = value.rsplit_once('\'').map_or(value, |(_, name)| name);
                extended = Some(name.to_string());
            }
            _ => {}
        }
    }

    extended.or(plain).filter(|name| !name.is_empty())
}
