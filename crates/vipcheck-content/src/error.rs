//! Error types for vipcheck-content

/// Result type for vipcheck-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning a declaration into a generic tree
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse {format} content: {message}")]
    ParseError { format: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            format: format.into(),
            message: message.into(),
        }
    }
}
