use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Placeholder used for PDF metadata fields the document does not carry
pub const UNKNOWN: &str = "Unknown";

/// Document-level metadata read from the PDF `Info` dictionary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfInfo {
    pub total_pages: u32,
    pub title: String,
    pub author: String,
    pub creation_date: String,
}

impl PdfInfo {
    pub fn unknown(total_pages: u32) -> Self {
        Self {
            total_pages,
            title: UNKNOWN.to_string(),
            author: UNKNOWN.to_string(),
            creation_date: UNKNOWN.to_string(),
        }
    }

    /// Title if the PDF declared one
    pub fn known_title(&self) -> Option<&str> {
        let title = self.title.trim();
        (!title.is_empty() && title != UNKNOWN).then_some(title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub page_number: u32, // 1-indexed
    pub text: String,
}

impl PageText {
    pub fn new(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Text pulled out of a single PDF, page by page
///
/// `full_text` is always the plain concatenation of the page texts, so
/// `char_count` equals the sum of every page's character count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    pub source_path: PathBuf,
    pub pages: Vec<PageText>,
    pub full_text: String,
    pub char_count: usize,
    pub info: PdfInfo,
}

impl ExtractedDocument {
    pub fn from_pages(source_path: impl Into<PathBuf>, pages: Vec<PageText>, info: PdfInfo) -> Self {
        let full_text: String = pages.iter().map(|p| p.text.as_str()).collect();
        let char_count = full_text.chars().count();

        Self {
            source_path: source_path.into(),
            pages,
            full_text,
            char_count,
            info,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// File name component of the source path, for display and report metadata
    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source_path.display().to_string())
    }

    /// Human-readable document name: PDF title when present, else the file stem
    pub fn display_name(&self) -> String {
        if let Some(title) = self.info.known_title() {
            return title.to_string();
        }
        self.source_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_name())
    }
}

/// Act summary as ordered bullet points
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub points: Vec<String>,
}

impl Summary {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The fixed legislative section categories pulled from every act
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionCategory {
    Definitions,
    Obligations,
    Responsibilities,
    Eligibility,
    Payments,
    Penalties,
    RecordKeeping,
}

impl SectionCategory {
    pub const ALL: [SectionCategory; 7] = [
        SectionCategory::Definitions,
        SectionCategory::Obligations,
        SectionCategory::Responsibilities,
        SectionCategory::Eligibility,
        SectionCategory::Payments,
        SectionCategory::Penalties,
        SectionCategory::RecordKeeping,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionCategory::Definitions => "definitions",
            SectionCategory::Obligations => "obligations",
            SectionCategory::Responsibilities => "responsibilities",
            SectionCategory::Eligibility => "eligibility",
            SectionCategory::Payments => "payments",
            SectionCategory::Penalties => "penalties",
            SectionCategory::RecordKeeping => "record_keeping",
        }
    }

    /// What the model is asked to pull out for this category
    pub fn description(&self) -> &'static str {
        match self {
            SectionCategory::Definitions => "Key terms defined in the Act",
            SectionCategory::Obligations => "Obligations stated in the Act",
            SectionCategory::Responsibilities => {
                "Responsibilities of the administering authority"
            }
            SectionCategory::Eligibility => "Eligibility criteria for claimants",
            SectionCategory::Payments => "Payment calculation or entitlement structure",
            SectionCategory::Penalties => "Enforcement or penalty mechanisms",
            SectionCategory::RecordKeeping => "Record-keeping or reporting requirements",
        }
    }
}

impl fmt::Display for SectionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extracted text spans keyed by section category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionExtraction {
    pub sections: BTreeMap<SectionCategory, Vec<String>>,
}

impl SectionExtraction {
    pub fn get(&self, category: SectionCategory) -> &[String] {
        self.sections
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn categories(&self) -> impl Iterator<Item = SectionCategory> + '_ {
        self.sections.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Outcome of a single rule check as judged by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCheck {
    pub rule_id: String,
    pub rule: String,
    pub passed: bool,
    pub evidence: String,
    pub confidence: u8, // 0-100
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleValidation {
    pub checks: Vec<RuleCheck>,
}

impl RuleValidation {
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed).count()
    }
}

/// Everything the analyzer produced for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: Summary,
    pub sections: SectionExtraction,
    pub rule_validation: RuleValidation,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_document() -> ExtractedDocument {
        ExtractedDocument::from_pages(
            "data/universal_credit_act.pdf",
            vec![
                PageText::new(1, "Universal Credit Act 2025\n"),
                PageText::new(2, "1 Standard allowance\n"),
                PageText::new(3, ""),
            ],
            PdfInfo::unknown(3),
        )
    }

    #[test]
    fn test_full_text_is_page_concatenation() {
        let doc = sample_document();
        assert_eq!(
            doc.full_text,
            "Universal Credit Act 2025\n1 Standard allowance\n"
        );
        let page_sum: usize = doc.pages.iter().map(PageText::char_count).sum();
        assert_eq!(doc.char_count, page_sum);
    }

    #[test]
    fn test_char_count_counts_characters_not_bytes() {
        let doc = ExtractedDocument::from_pages(
            "act.pdf",
            vec![PageText::new(1, "§ 5 ¶ £100\n")],
            PdfInfo::unknown(1),
        );
        assert_eq!(doc.char_count, 11);
        assert!(doc.full_text.len() > doc.char_count);
    }

    #[test]
    fn test_display_name_prefers_title() {
        let mut doc = sample_document();
        assert_eq!(doc.display_name(), "universal_credit_act");

        doc.info.title = "Universal Credit Act 2025".to_string();
        assert_eq!(doc.display_name(), "Universal Credit Act 2025");
        assert_eq!(doc.file_name(), "universal_credit_act.pdf");
    }

    #[test]
    fn test_section_category_serializes_snake_case() {
        let json = serde_json::to_string(&SectionCategory::RecordKeeping).unwrap();
        assert_eq!(json, "\"record_keeping\"");

        for category in SectionCategory::ALL {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json, category.as_str());
        }
    }

    #[test]
    fn test_section_extraction_serializes_as_flat_map() {
        let mut sections = SectionExtraction::default();
        sections.sections.insert(
            SectionCategory::Payments,
            vec!["Section 2: standard allowance uplift".to_string()],
        );

        let json = serde_json::to_value(&sections).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "payments": ["Section 2: standard allowance uplift"] })
        );

        let back: SectionExtraction = serde_json::from_value(json).unwrap();
        assert_eq!(back, sections);
        assert!(back.get(SectionCategory::Penalties).is_empty());
    }

    #[test]
    fn test_rule_validation_counts() {
        let check = |passed| RuleCheck {
            rule_id: "R1".to_string(),
            rule: "Act must define key terms".to_string(),
            passed,
            evidence: "Section 1".to_string(),
            confidence: 90,
        };
        let validation = RuleValidation {
            checks: vec![check(true), check(false), check(true)],
        };
        assert_eq!(validation.passed(), 2);
        assert_eq!(validation.failed(), 1);
    }
}
