//! Shared PDF handling utilities
//!
//! This crate turns a legislative PDF into an [`ExtractedDocument`]: page-ordered
//! cleaned text, the concatenated full text, and the document's `Info` metadata.
//! Per-page extraction goes through lopdf; pdf-extract is the whole-document
//! fallback when lopdf cannot decode a page.

pub mod error;
pub mod metadata;
pub mod parser;
pub mod text;

#[cfg(any(test, feature = "test-support"))]
pub mod fixtures;

pub use error::ExtractionError;
pub use parser::{write_text, PdfExtractor, EXTRACTED_TEXT_FILE};
pub use shared_types::ExtractedDocument;
