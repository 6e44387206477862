//! System Prompt Generator - Frontend Rust/Leptos Application
//!
//! A WebAssembly page that uploads four files (call flow, example script,
//! job description, job details) to the generator service and offers the
//! returned system prompt as a download.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MainContent                                                 │
//! │  ├── Hero (title, description)                              │
//! │  └── UploadForm ──▶ UploadSubmitHandler ──▶ FetchTransport  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`] - Endpoint configuration
//! - [`types`] - Upload fields, payload, artifact, phases, errors
//! - [`components`] - UI components (Hero, UploadForm, Footer)
//! - [`services`] - Transport, submission handler, browser helpers

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Payload
    UploadField, UploadPayload,
    // Response
    ResponseArtifact,
    // UI
    SubmitPhase,
    // Errors
    AppError, AppResult,
};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=MainContent/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn MainContent() -> impl IntoView {
    let config = UploadConfig::from_build_env();
    log::info!("📡 Generator endpoint: {}", config.endpoint_url);

    view! {
        <div class="container">
            <Hero/>
            <UploadForm config=config/>
        </div>

        <Footer/>
    }
}
