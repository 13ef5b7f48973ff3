use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while extracting text from a PDF
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse PDF: {0}")]
    Parse(String),

    #[error("PDF is encrypted or password-protected")]
    Encrypted,
}

impl ExtractionError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExtractionError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for missing, unreadable or unwritable files
    pub fn is_io(&self) -> bool {
        matches!(self, ExtractionError::Io { .. })
    }
}
