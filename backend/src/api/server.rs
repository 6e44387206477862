//! HTTP Server for the prompt generator.
//!
//! # API Endpoints
//!
//! | Method | Path         | Description                                   |
//! |--------|--------------|-----------------------------------------------|
//! | GET    | `/health`    | Health check                                  |
//! | POST   | `/generate/` | Multipart upload of the four files, returns the prompt as a text attachment |
//! | GET    | `/api/logs`  | SSE stream for real-time logs                 |

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use super::logs::{log_request, LogLevel, LOG_BROADCASTER};
use super::types::{attachment, error_response, HealthResponse};
use crate::ai::{AiClient, PromptTemplate};
use crate::error::{GenerateError, ServerError, ServerResult};
use crate::inputs::{GenerateInputs, UploadedFile};
use crate::pipeline::generate_prompt;

/// Largest accepted multipart body
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    pub ai: AiClient,
    pub template: Arc<PromptTemplate>,
}

impl AppState {
    pub fn new(ai: AiClient, template: PromptTemplate) -> Self {
        Self {
            ai,
            template: Arc::new(template),
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    // Browsers need Content-Disposition exposed to read the file name
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/generate", post(generate))
        .route("/generate/", post(generate))
        .route("/api/logs", get(sse_logs))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(port: u16, state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    let model = state.ai.model().to_string();
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 Prompt generator running on http://localhost:{}", port);
    println!("   POST /generate/ - Upload flow, example, job description and job details");
    println!("   GET  /api/logs  - SSE log stream");
    println!("   GET  /health    - Health check");
    println!();
    println!("🤖 Model: {}", model);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.ai.model()))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    // Lagged receivers skip the entries they missed
    let stream = BroadcastStream::new(rx).filter_map(|result| {
        let entry = result.ok()?;
        let json = serde_json::to_string(&entry).ok()?;
        Some(Ok(Event::default().data(json)))
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Generate endpoint: four files in, one text attachment out
async fn generate(State(state): State<AppState>, multipart: Multipart) -> ServerResult<Response> {
    let request_id = Uuid::new_v4().to_string();

    let uploads = read_uploads(multipart).await?;
    let summary = uploads
        .iter()
        .map(|u| format!("{}={} ({} bytes)", u.field, u.name(), u.bytes.len()))
        .collect::<Vec<_>>()
        .join(", ");
    log_request(LogLevel::Info, &request_id, format!("📄 New upload: {}", summary));

    let result = async {
        let inputs = GenerateInputs::from_uploads(uploads).map_err(GenerateError::from)?;
        generate_prompt(&inputs, &state.ai, &state.template).await
    }
    .await;

    match result {
        Ok(generated) => {
            log_request(LogLevel::Success, &request_id, format!("Sent {}", generated.file_name));
            Ok((
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, attachment(&generated.file_name)),
                ],
                generated.text,
            )
                .into_response())
        }
        Err(e) => {
            log_request(LogLevel::Error, &request_id, e.to_string());
            Err(e.into())
        }
    }
}

/// Drain the multipart body into uploads
async fn read_uploads(mut multipart: Multipart) -> ServerResult<Vec<UploadedFile>> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        let file_name = field.file_name().map(|s| s.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ServerError::BadRequest(format!("Read error for {}: {}", name, e)))?;
        uploads.push(UploadedFile::new(name, file_name, bytes.to_vec()));
    }

    Ok(uploads)
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(error_response(&self.to_string()))).into_response()
    }
}
