pub mod types;

pub use types::{
    AnalysisResult, ExtractedDocument, PageText, PdfInfo, RuleCheck, RuleValidation,
    SectionCategory, SectionExtraction, Summary, UNKNOWN,
};
