//! AI Module for prompt generation
//!
//! Sends the rendered template to Google Gemini and returns the generated
//! system prompt.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use promptgen::ai::{AiClient, render_prompt};
//!
//! let client = AiClient::from_env()?;
//! let text = client.generate(&render_prompt(&job_data)).await?;
//! ```

pub mod prompt;

use serde::Deserialize;
use serde_json::json;
use std::env;
use std::time::Duration;

use crate::api::logs::{log_info, log_success, log_warning};
pub use crate::error::{AiError, AiResult};

pub use prompt::{render_prompt, PromptTemplate, DEFAULT_TEMPLATE};

/// Model used when `GEMINI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Public Gemini API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default number of attempts
const DEFAULT_MAX_RETRIES: u32 = 3;

/// Delay between retries in milliseconds
const RETRY_DELAY_MS: u64 = 1000;

/// Gemini API client
#[derive(Clone)]
pub struct AiClient {
    api_key: String,
    model: String,
    base_url: String,
    max_retries: u32,
    retry_delay: Duration,
    http: reqwest::Client,
}

impl std::fmt::Debug for AiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

/// `generateContent` response structure
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Gemini API error response
#[derive(Debug, Deserialize)]
struct GeminiError {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl AiClient {
    /// Create a new client with explicit API key
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_millis(RETRY_DELAY_MS),
            http: reqwest::Client::new(),
        }
    }

    /// Create a client from `GOOGLE_API_KEY` (and optional `GEMINI_MODEL`)
    pub fn from_env() -> AiResult<Self> {
        // Try loading .env file
        let _ = dotenvy::dotenv();

        let api_key = env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(AiError::MissingApiKey)?;

        let client = Self::new(api_key);
        Ok(match env::var("GEMINI_MODEL") {
            Ok(model) if !model.trim().is_empty() => client.with_model(model.trim()),
            _ => client,
        })
    }

    /// Set the model to use
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Point the client at another host (proxies, tests)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Set the number of attempts (at least one)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Set the delay between attempts
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate text for `prompt`, retrying transient failures
    pub async fn generate(&self, prompt: &str) -> AiResult<String> {
        let mut attempt = 1;
        loop {
            match self.call_api(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    log_warning(format!(
                        "Attempt {}/{} failed: {}, retrying in {}ms",
                        attempt,
                        self.max_retries,
                        e,
                        self.retry_delay.as_millis()
                    ));
                    tokio::time::sleep(self.retry_delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Call the `generateContent` endpoint once
    async fn call_api(&self, prompt: &str) -> AiResult<String> {
        log_info(format!(
            "📡 Calling Gemini ({}), prompt {} chars",
            self.model,
            prompt.chars().count()
        ));

        let request_body = json!({
            "contents": [
                { "role": "user", "parts": [{ "text": prompt }] }
            ]
        });

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AiError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AiError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AiError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let text = extract_text(&body)?;
        log_success(format!("Received {} chars from Gemini", text.chars().count()));
        Ok(text)
    }
}

/// Text of the first candidate, parts concatenated
fn extract_text(body: &str) -> AiResult<String> {
    let response: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| AiError::InvalidJson(e.to_string()))?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(AiError::EmptyResponse);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

    fn client(server: &MockServer) -> AiClient {
        AiClient::new("test-key".into())
            .with_base_url(&server.uri())
            .with_retry_delay(Duration::from_millis(1))
    }

    fn reply(text: &str) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }, { "text": " (end)" }] },
                "finishReason": "STOP"
            }]
        })
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body = reply("You are RecruitAI").to_string();
        assert_eq!(extract_text(&body).unwrap(), "You are RecruitAI (end)");
    }

    #[test]
    fn test_extract_text_without_candidates() {
        assert!(matches!(extract_text(r#"{"candidates": []}"#), Err(AiError::EmptyResponse)));
        assert!(matches!(extract_text("{}"), Err(AiError::EmptyResponse)));
        assert!(matches!(extract_text("not json"), Err(AiError::InvalidJson(_))));
    }

    #[tokio::test]
    async fn test_generate_sends_prompt_and_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{ "parts": [{ "text": "Write the prompt" }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("Done")))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server).generate("Write the prompt").await.unwrap();
        assert_eq!(text, "Done (end)");
    }

    #[tokio::test]
    async fn test_api_error_message_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server).generate("x").await.unwrap_err();
        match err {
            AiError::ApiError { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_server_errors_are_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("Third time")))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server).generate("x").await.unwrap();
        assert_eq!(text, "Third time (end)");
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(2)
            .mount(&server)
            .await;

        let err = client(&server)
            .with_max_retries(2)
            .generate("x")
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::ApiError { status: 500, ref message } if message == "boom"));
    }

    #[tokio::test]
    async fn test_custom_model_in_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server)
            .with_model("gemini-2.0-flash")
            .generate("x")
            .await
            .unwrap();
        assert_eq!(text, "ok (end)");
    }
}
