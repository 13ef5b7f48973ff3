//! actlens pipeline
//!
//! Extract text from a legislative PDF, run the three model analyses over it,
//! and write `extracted_text.txt` plus `final_report.json` to the output
//! directory. Stages run strictly in sequence and the first failure aborts
//! the run.

use std::path::{Path, PathBuf};
use std::time::Instant;

use act_analyzer::{truncate_to_window, Analyzer, EXTRACTION_WINDOW};
use anyhow::Context;
use chrono::Utc;
use llm_client::ChatModel;
use report_compiler::{Report, ReportCompiler, RunStats, REPORT_FILE};
use shared_pdf::{write_text, PdfExtractor};
use tracing::info;

/// Default input document
pub const DEFAULT_PDF: &str = "data/ukpga_20250022_en.pdf";

/// Default directory for generated files
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Files produced by one run
#[derive(Debug)]
pub struct PipelineOutput {
    pub report: Report,
    pub text_path: PathBuf,
    pub report_path: PathBuf,
}

/// Run extraction, analysis and report compilation for one PDF.
///
/// `document_name` overrides the name used in prompts and the report; when
/// absent the PDF title (or file stem) is used.
pub async fn run_pipeline<M: ChatModel>(
    pdf: &Path,
    output_dir: &Path,
    model: M,
    document_name: Option<String>,
) -> anyhow::Result<PipelineOutput> {
    let started_at = Utc::now();
    let timer = Instant::now();

    info!(pdf = %pdf.display(), "Extracting text");
    let document = PdfExtractor::extract(pdf)
        .with_context(|| format!("Failed to extract text from {}", pdf.display()))?;
    info!(
        pages = document.page_count(),
        chars = document.char_count,
        "Extracted text"
    );

    let text_path = write_text(&document, output_dir).context("Failed to save extracted text")?;

    let document_name = document_name.unwrap_or_else(|| document.display_name());
    let analyzer = Analyzer::new(model, document_name.clone());
    let analyzed_length = truncate_to_window(&document.full_text, EXTRACTION_WINDOW)
        .chars()
        .count();

    info!(document = %document_name, model = analyzer.model_name(), "Analyzing document");
    let analysis = analyzer
        .analyze(&document.full_text)
        .await
        .context("Analysis failed")?;

    let run = RunStats {
        document_name,
        started_at,
        elapsed: timer.elapsed(),
        api_calls: analyzer.api_calls(),
        model: analyzer.model_name().to_string(),
        analyzed_length,
        extracted_text_file: Some(text_path.clone()),
    };

    let report = ReportCompiler::compile(&document, &analysis, &run);
    let report_path = ReportCompiler::write(&report, output_dir.join(REPORT_FILE))
        .context("Failed to write report")?;

    info!(
        elapsed_ms = report.metadata.elapsed_ms,
        api_calls = report.metadata.api_calls,
        passed = report.rule_checks.passed,
        failed = report.rule_checks.failed,
        "Analysis complete"
    );

    Ok(PipelineOutput {
        report,
        text_path,
        report_path,
    })
}
