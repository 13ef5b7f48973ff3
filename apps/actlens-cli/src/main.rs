//! actlens
//!
//! Runs the full pipeline with no arguments: reads
//! `data/ukpga_20250022_en.pdf`, calls Gemini through its OpenAI-compatible
//! endpoint (key from `GEMINI_API_KEY`) and writes results to `output/`.

use std::path::PathBuf;
use std::time::Duration;

use actlens_cli::{run_pipeline, DEFAULT_OUTPUT_DIR, DEFAULT_PDF};
use anyhow::Context;
use clap::Parser;
use llm_client::config::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use llm_client::{ChatClient, LlmConfig};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for actlens
#[derive(Parser, Debug)]
#[command(name = "actlens")]
#[command(about = "Summarize and compliance-check a legislative PDF")]
struct Args {
    /// PDF to analyze
    #[arg(long, default_value = DEFAULT_PDF)]
    pdf: PathBuf,

    /// Directory for extracted_text.txt and final_report.json
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Model name
    #[arg(long, env = "ACTLENS_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// OpenAI-compatible API base URL
    #[arg(long, env = "ACTLENS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Document name used in prompts (defaults to the PDF title)
    #[arg(long)]
    document_name: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = LlmConfig::from_env()
        .context("Gemini API key required")?
        .with_base_url(args.base_url)
        .with_model(args.model)
        .with_timeout(Duration::from_secs(args.timeout_secs));
    let client = ChatClient::new(config).context("Failed to build HTTP client")?;

    let output = run_pipeline(&args.pdf, &args.output_dir, client, args.document_name).await?;

    info!(
        text = %output.text_path.display(),
        report = %output.report_path.display(),
        "Done"
    );
    Ok(())
}
