//! Error types
//!
//! `GatewayError` is the outcome of a request that does not end in a served
//! file; each variant carries its own status code and plain-text body.

use hyper::StatusCode;
use thiserror::Error;

/// Body of the 404 returned when the entry document has not been built yet.
pub const ENTRY_MISSING_MESSAGE: &str = "Polotno UI not found. Please build polotno-src first: cd polotno-src && npm install && npm run build";

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Sub-path contains `..` or starts with `/`
    #[error("Invalid path")]
    InvalidPath,

    #[error("{}", ENTRY_MISSING_MESSAGE)]
    EntryMissing,

    #[error("File not found")]
    NotFound,

    /// Unexpected filesystem failure (permissions, I/O errors)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidPath => StatusCode::BAD_REQUEST,
            Self::EntryMissing | Self::NotFound => StatusCode::NOT_FOUND,
            Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain-text body sent to the client. I/O details stay in the logs.
    pub fn body(&self) -> String {
        match self {
            Self::Io(_) => "500 Internal Server Error".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
