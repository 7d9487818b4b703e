//! Error types for vipcheck-bigip

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure: connection, TLS, timeout
    #[error("HTTP request to the device failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The device answered with a non-success status
    #[error("Device returned {status} for {url}: {body}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },

    /// The response body is not the expected JSON document
    #[error("Failed to decode device response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
