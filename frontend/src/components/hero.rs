//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"System Prompt Generator"</h1>
            <p class="subtitle">
                "Upload the call flow, an example script, the job description and the job details. "
                "The generator returns a ready-to-use recruiter system prompt."
            </p>
        </div>
    }
}
