//! PDF text extraction
//!
//! Loads the document with lopdf, pulls text page by page and cleans it.
//! When lopdf cannot decode a page (unusual font encodings), the whole
//! document is re-read through pdf-extract and split on form feeds.

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::Document;
use shared_types::{ExtractedDocument, PageText};
use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::metadata::read_info;
use crate::text::{clean_page_text, split_form_feeds};

/// File name of the extracted-text side artifact
pub const EXTRACTED_TEXT_FILE: &str = "extracted_text.txt";

/// Main PDF extraction interface
pub struct PdfExtractor;

impl PdfExtractor {
    /// Extract text from the PDF at `path`.
    ///
    /// # Errors
    /// - `ExtractionError::Io` - the file is missing or unreadable
    /// - `ExtractionError::Parse` - the PDF is malformed or has no pages
    /// - `ExtractionError::Encrypted` - the PDF requires a password
    pub fn extract(path: impl AsRef<Path>) -> Result<ExtractedDocument, ExtractionError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| ExtractionError::io(path, e))?;
        debug!(path = %path.display(), bytes = bytes.len(), "Read PDF");

        Self::extract_from_bytes(path, &bytes)
    }

    /// Extract text from PDF bytes already in memory
    pub fn extract_from_bytes(
        source: impl Into<PathBuf>,
        bytes: &[u8],
    ) -> Result<ExtractedDocument, ExtractionError> {
        let source = source.into();
        let doc = Document::load_mem(bytes).map_err(|e| classify_load_error(&e.to_string()))?;

        if doc.trailer.has(b"Encrypt") {
            return Err(ExtractionError::Encrypted);
        }

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Err(ExtractionError::Parse("document has no pages".to_string()));
        }

        let raw_pages = match extract_pages_lopdf(&doc, &page_numbers) {
            Ok(pages) => pages,
            Err(e) => {
                warn!(error = %e, "Per-page extraction failed, falling back to pdf-extract");
                extract_pages_fallback(bytes, page_numbers.len())?
            }
        };

        let pages: Vec<PageText> = page_numbers
            .iter()
            .zip(raw_pages)
            .map(|(&number, raw)| PageText::new(number, clean_page_text(&raw)))
            .collect();

        let info = read_info(&doc, page_numbers.len() as u32);
        let document = ExtractedDocument::from_pages(source, pages, info);

        info!(
            source = %document.source_path.display(),
            pages = document.page_count(),
            chars = document.char_count,
            "Extracted PDF text"
        );

        Ok(document)
    }
}

fn extract_pages_lopdf(doc: &Document, page_numbers: &[u32]) -> Result<Vec<String>, lopdf::Error> {
    page_numbers
        .iter()
        .map(|&number| doc.extract_text(&[number]))
        .collect()
}

fn extract_pages_fallback(bytes: &[u8], page_count: usize) -> Result<Vec<String>, ExtractionError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| classify_load_error(&e.to_string()))?;

    Ok(split_form_feeds(&text, page_count))
}

fn classify_load_error(message: &str) -> ExtractionError {
    let lower = message.to_lowercase();
    if lower.contains("encrypt") || lower.contains("password") || lower.contains("decrypt") {
        ExtractionError::Encrypted
    } else {
        ExtractionError::Parse(message.to_string())
    }
}

/// Write the document's full text to `<output_dir>/extracted_text.txt`,
/// creating the directory if needed. Returns the written path.
pub fn write_text(
    document: &ExtractedDocument,
    output_dir: impl AsRef<Path>,
) -> Result<PathBuf, ExtractionError> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir).map_err(|e| ExtractionError::io(output_dir, e))?;

    let path = output_dir.join(EXTRACTED_TEXT_FILE);
    fs::write(&path, &document.full_text).map_err(|e| ExtractionError::io(&path, e))?;

    info!(path = %path.display(), "Extracted text saved");
    Ok(path)
}
