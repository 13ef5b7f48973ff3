//! Report compilation
//!
//! Merges the extracted document, the analysis records and run statistics
//! into a [`Report`] and writes it as pretty-printed JSON.

pub mod error;
pub mod report;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use shared_types::{AnalysisResult, ExtractedDocument};
use tracing::info;

pub use error::ReportError;
pub use report::{Report, ReportMetadata, RuleChecksSection, SummarySection, TextExtractionSection};

/// File name of the final report
pub const REPORT_FILE: &str = "final_report.json";

/// Run statistics gathered by the caller
#[derive(Debug, Clone)]
pub struct RunStats {
    pub document_name: String,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    pub api_calls: u32,
    pub model: String,
    pub analyzed_length: usize,
    pub extracted_text_file: Option<PathBuf>,
}

pub struct ReportCompiler;

impl ReportCompiler {
    pub fn compile(
        document: &ExtractedDocument,
        analysis: &AnalysisResult,
        run: &RunStats,
    ) -> Report {
        let source_file = document.source_path.display().to_string();
        let validation = &analysis.rule_validation;

        Report {
            metadata: ReportMetadata {
                document_name: run.document_name.clone(),
                source_file: source_file.clone(),
                analysis_date: run.started_at,
                elapsed_ms: u64::try_from(run.elapsed.as_millis()).unwrap_or(u64::MAX),
                api_calls: run.api_calls,
                model: run.model.clone(),
                pdf_info: document.info.clone(),
            },
            text_extraction: TextExtractionSection {
                source_file,
                page_count: document.page_count(),
                text_length: document.char_count,
                analyzed_length: run.analyzed_length,
                extracted_text_file: run
                    .extracted_text_file
                    .as_ref()
                    .map(|p| p.display().to_string()),
            },
            summary: SummarySection {
                summary_points: analysis.summary.points.clone(),
            },
            legislative_sections: analysis.sections.clone(),
            rule_checks: RuleChecksSection {
                total_rules: validation.checks.len(),
                passed: validation.passed(),
                failed: validation.failed(),
                checks: validation.checks.clone(),
            },
        }
    }

    pub fn to_json(report: &Report) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    /// Write the report to `path`, creating parent directories and replacing
    /// any existing file.
    pub fn write(report: &Report, path: impl AsRef<Path>) -> Result<PathBuf, ReportError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ReportError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let json = Self::to_json(report)?;
        fs::write(path, json).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "Report saved");
        Ok(path.to_path_buf())
    }
}
