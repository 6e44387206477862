//! High-level pipeline: four uploaded files in, one system prompt out.
//!
//! Steps: parse the call flow, decode the example script, extract the job
//! data from both JSON files, render the prompt template, and send the
//! rendered prompt to Gemini.
//!
//! # Example
//!
//! ```rust,ignore
//! use promptgen::pipeline::generate_prompt;
//!
//! let generated = generate_prompt(&inputs, &AiClient::from_env()?, &PromptTemplate::default()).await?;
//! std::fs::write(&generated.file_name, &generated.text)?;
//! ```

use serde::Serialize;

use crate::ai::{AiClient, PromptTemplate};
use crate::api::logs::{log_info, log_info_indent, log_success};
use crate::error::GenerateResult;
use crate::inputs::GenerateInputs;
use crate::job::{parse_json, JobData};
use crate::parser::{extract_script, parse_flow};

/// Name of the generated download.
pub const OUTPUT_FILE_NAME: &str = "RecruitAI_System_Prompt.txt";

/// A generated system prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPrompt {
    pub text: String,
    pub file_name: String,
}

/// Parse every input into the data the template needs.
pub fn build_job_data(inputs: &GenerateInputs) -> GenerateResult<JobData> {
    let flow_steps = parse_flow(inputs.flow.name(), &inputs.flow.bytes)?;
    log_info_indent(format!("Flow: {} step(s) from {}", flow_steps.len(), inputs.flow.name()), 1);

    let script = extract_script(&inputs.example.bytes);
    log_info_indent(format!("Example script: {} chars", script.chars().count()), 1);

    let job_desc = parse_json(&inputs.job_desc.field, &inputs.job_desc.bytes)?;
    let job_details = parse_json(&inputs.job_detail.field, &inputs.job_detail.bytes)?;

    Ok(JobData::extract(&job_desc, &job_details, flow_steps, script)?)
}

/// Render the template without calling the model.
pub fn render_only(inputs: &GenerateInputs, template: &PromptTemplate) -> GenerateResult<String> {
    let data = build_job_data(inputs)?;
    Ok(template.render(&data))
}

/// Run the full pipeline.
pub async fn generate_prompt(
    inputs: &GenerateInputs,
    client: &AiClient,
    template: &PromptTemplate,
) -> GenerateResult<GeneratedPrompt> {
    log_info("📄 Reading uploaded files");
    let data = build_job_data(inputs)?;
    log_success(format!("Job data ready for {}", data.company));

    let rendered = template.render(&data);
    log_info(format!("🤖 Generating system prompt with {}", client.model()));
    let text = client.generate(&rendered).await?;
    log_success(format!("System prompt generated ({} chars)", text.chars().count()));

    Ok(GeneratedPrompt {
        text,
        file_name: OUTPUT_FILE_NAME.to_string(),
    })
}
