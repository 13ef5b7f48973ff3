//! Error types for the chat client.

use thiserror::Error;

/// Result type for chat client operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Chat client errors.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Rejected credentials (401/403)
    #[error("Authentication failed ({status}): {message}")]
    Auth { status: u16, message: String },

    /// Any other non-2xx response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not have the chat-completion shape
    #[error("Parse error: {0}")]
    Parse(String),
}

impl LlmError {
    /// Map a non-success HTTP status and its body to an error.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => LlmError::Auth { status, message },
            _ => LlmError::Api { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses() {
        assert!(matches!(LlmError::from_status(401, "bad key"), LlmError::Auth { status: 401, .. }));
        assert!(matches!(LlmError::from_status(403, "denied"), LlmError::Auth { status: 403, .. }));
    }

    #[test]
    fn test_other_statuses_are_api_errors() {
        let err = LlmError::from_status(429, "quota exceeded");
        assert!(matches!(err, LlmError::Api { status: 429, .. }));
        assert_eq!(err.to_string(), "API error (429): quota exceeded");
    }
}
