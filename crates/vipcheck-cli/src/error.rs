//! Error types for vipcheck-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from vipcheck-core
    #[error(transparent)]
    Core(#[from] vipcheck_core::Error),

    /// Error talking to the device
    #[error(transparent)]
    Device(#[from] vipcheck_bigip::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Suggestion printed after the error, if there is one
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Core(vipcheck_core::Error::MissingConfiguration { item }) => match *item {
                "host" => Some("pass --host or set F5_HOST"),
                "username" => Some("pass --username or set F5_USERNAME"),
                "password" => Some("set the F5_PASSWORD environment variable"),
                _ => Some("pass --terraform-dir or set VIPCHECK_TERRAFORM_DIR"),
            },
            _ => None,
        }
    }
}
