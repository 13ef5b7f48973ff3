//! Final report layout

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{PdfInfo, RuleCheck, SectionExtraction};

/// Complete analysis report for one legislative document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub text_extraction: TextExtractionSection,
    pub summary: SummarySection,
    pub legislative_sections: SectionExtraction,
    pub rule_checks: RuleChecksSection,
}

/// Run and document metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub document_name: String,
    pub source_file: String,
    pub analysis_date: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub api_calls: u32,
    pub model: String,
    pub pdf_info: PdfInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextExtractionSection {
    pub source_file: String,
    pub page_count: usize,
    /// Characters in the full extracted text
    pub text_length: usize,
    /// Characters actually sent to the model
    pub analyzed_length: usize,
    /// Full text is stored separately
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_text_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySection {
    pub summary_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleChecksSection {
    pub total_rules: usize,
    pub passed: usize,
    pub failed: usize,
    pub checks: Vec<RuleCheck>,
}
