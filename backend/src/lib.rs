//! # Promptgen - recruiter voice-agent system prompts
//!
//! Promptgen turns four files (a call flow, an example script, a job
//! description and job details) into a system prompt for a recruiting
//! voice agent.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ 4 uploads   │────▶│   Parsers   │────▶│  Template   │────▶│   Gemini    │
//! │ (multipart) │     │ (XML/JSON)  │     │  (render)   │     │  (prompt)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use promptgen::{generate_prompt, AiClient, GenerateInputs, PromptTemplate};
//!
//! #[tokio::main]
//! async fn main() {
//!     let inputs = GenerateInputs::from_paths(flow, example, desc, details).unwrap();
//!     let client = AiClient::from_env().unwrap();
//!     let prompt = generate_prompt(&inputs, &client, &PromptTemplate::default()).await.unwrap();
//!     println!("{}", prompt.text);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`inputs`] - The four uploaded files
//! - [`parser`] - Call flow and script parsing
//! - [`job`] - Job data extraction
//! - [`ai`] - Prompt template and Gemini client
//! - [`pipeline`] - End-to-end generation
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod inputs;

// Parsing
pub mod job;
pub mod parser;

// AI
pub mod ai;

// Generation
pub mod pipeline;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{AiError, FlowError, GenerateError, InputError, ServerError};

pub use inputs::{GenerateInputs, UploadedFile, FIELDS};

pub use parser::{extract_script, parse_flow, UNSUPPORTED_FORMAT};

pub use job::JobData;

pub use ai::{render_prompt, AiClient, PromptTemplate};

pub use pipeline::{build_job_data, generate_prompt, render_only, GeneratedPrompt, OUTPUT_FILE_NAME};

pub use api::{error_response, router, start_server, AppState};
