//! Promptgen CLI - generate recruiter system prompts
//!
//! ```bash
//! promptgen serve                      # Start HTTP server (port 8000)
//! promptgen generate --flow flow.xml --example script.txt \
//!     --job-desc desc.json --job-detail details.json
//! promptgen render ...                 # Render the template only, no model call
//! ```

use clap::{Args, Parser, Subcommand};
use promptgen::{
    generate_prompt, render_only, start_server, AiClient, AppState, GenerateInputs,
    PromptTemplate, OUTPUT_FILE_NAME,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "promptgen")]
#[command(about = "Generate recruiter voice-agent system prompts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,

        /// Prompt template file (default: built-in)
        #[arg(short, long)]
        template: Option<PathBuf>,
    },

    /// Full pipeline: files → template → Gemini → system prompt
    Generate {
        #[command(flatten)]
        files: InputFiles,

        /// Output file
        #[arg(short, long, default_value = OUTPUT_FILE_NAME)]
        output: PathBuf,

        /// Prompt template file (default: built-in)
        #[arg(short, long)]
        template: Option<PathBuf>,
    },

    /// Render the prompt template without calling the model
    Render {
        #[command(flatten)]
        files: InputFiles,

        /// Output file
        #[arg(short, long, default_value = "rendered_prompt.txt")]
        output: PathBuf,

        /// Prompt template file (default: built-in)
        #[arg(short, long)]
        template: Option<PathBuf>,
    },
}

#[derive(Args)]
struct InputFiles {
    /// Call flow (XML; other formats get a placeholder step)
    #[arg(long)]
    flow: PathBuf,

    /// Example script (text)
    #[arg(long)]
    example: PathBuf,

    /// Job description (JSON)
    #[arg(long)]
    job_desc: PathBuf,

    /// Job details with screening questions (JSON)
    #[arg(long)]
    job_detail: PathBuf,
}

impl InputFiles {
    fn load(&self) -> Result<GenerateInputs, Box<dyn std::error::Error>> {
        eprintln!("📄 Flow:        {}", self.flow.display());
        eprintln!("   Example:     {}", self.example.display());
        eprintln!("   Job desc:    {}", self.job_desc.display());
        eprintln!("   Job details: {}", self.job_detail.display());
        Ok(GenerateInputs::from_paths(
            &self.flow,
            &self.example,
            &self.job_desc,
            &self.job_detail,
        )?)
    }
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port, template } => cmd_serve(port, template.as_deref()).await,

        Commands::Generate {
            files,
            output,
            template,
        } => cmd_generate(&files, &output, template.as_deref()).await,

        Commands::Render {
            files,
            output,
            template,
        } => cmd_render(&files, &output, template.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn load_template(path: Option<&Path>) -> Result<PromptTemplate, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            eprintln!("   Template:    {}", path.display());
            Ok(PromptTemplate::from_file(path)?)
        }
        None => Ok(PromptTemplate::default()),
    }
}

async fn cmd_serve(port: u16, template: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(AiClient::from_env()?, load_template(template)?);
    start_server(port, state).await
}

async fn cmd_generate(
    files: &InputFiles,
    output: &Path,
    template: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let inputs = files.load()?;
    let template = load_template(template)?;
    let client = AiClient::from_env()?;

    let generated = generate_prompt(&inputs, &client, &template).await?;
    fs::write(output, &generated.text)?;

    eprintln!("   💾 Saved to: {}", output.display());
    eprintln!("\n✨ Done!");
    Ok(())
}

fn cmd_render(
    files: &InputFiles,
    output: &Path,
    template: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let inputs = files.load()?;
    let template = load_template(template)?;

    let rendered = render_only(&inputs, &template)?;
    fs::write(output, &rendered)?;

    eprintln!("   💾 Saved to: {}", output.display());
    Ok(())
}
