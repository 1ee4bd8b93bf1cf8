//! Error types for Procore API operations.

use thiserror::Error;

/// Errors that can occur during Procore API operations.
#[derive(Debug, Error)]
pub enum ProcoreError {
    /// Configuration is missing or incomplete.
    #[error("Procore configuration required: {0}")]
    ConfigMissing(String),

    /// Entity not found.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The API rejected the request parameters (e.g. a duplicate name).
    #[error("wrong request parameters: {message}")]
    WrongParams { message: String },

    /// API request failed.
    #[error("Procore API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Local file I/O error while preparing an upload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Upload path has no usable file name.
    #[error("Invalid file path '{0}': no file name component")]
    InvalidPath(String),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

/// Result type alias for Procore operations.
pub type Result<T> = core::result::Result<T, ProcoreError>;
