//! Error types for vipcheck-core

use std::path::PathBuf;

use crate::config::NameConvention;

/// Result type for vipcheck-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vipcheck-core operations
///
/// Every variant is fatal for a run: there is no partial comparison.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A declared virtual server does not exist on the device
    #[error("Virtual server '{name}' is declared but not found on the device")]
    MissingRemoteResource { name: String },

    /// The declarations directory or one of its entries cannot be read
    #[error("Cannot read {path}: {source}")]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A declaration file cannot be turned into a generic tree
    #[error("Cannot parse declaration {path}: {source}")]
    UnparsableDeclaration {
        path: PathBuf,
        #[source]
        source: vipcheck_content::Error,
    },

    /// A declaration file has no `name` field
    #[error("Declaration {path} has no name field")]
    UnnamedDeclaration { path: PathBuf },

    /// A declared name cannot be mapped to a device name
    #[error("Resource name '{name}' in {path} does not fit the naming convention ({convention})")]
    InvalidResourceName {
        path: PathBuf,
        name: String,
        convention: NameConvention,
    },

    /// A required configuration item is absent or empty
    #[error("Missing required configuration: {item}")]
    MissingConfiguration { item: &'static str },

    /// Configuration is present but contradictory or malformed
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

impl Error {
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::UnreadableSource {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}
