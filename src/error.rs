//! Error types for Code Dx API operations.

use thiserror::Error;

use crate::response::ContentType;

/// Errors that can occur during Code Dx API operations.
#[derive(Debug, Error)]
pub enum CodeDxError {
    /// Configuration is missing or incomplete.
    #[error("Code Dx configuration required: {0}")]
    ConfigMissing(String),

    /// The server answered with a non-success status.
    #[error("Code Dx returned status {status}: {message}")]
    Server { status: u16, message: String },

    /// The response body cannot be trusted: the declared content type does
    /// not match the one the caller negotiated.
    #[error("response content type mismatch: expected '{expected}', got {found:?}")]
    ContentTypeMismatch {
        expected: ContentType,
        found: Option<String>,
    },

    /// A scan file with an extension outside the accepted upload set.
    #[error("scan file '{file_name}' is not an accepted upload format")]
    UnsupportedScanFile { file_name: String },

    /// An analysis prep still has unresolved verification errors.
    #[error("analysis prep '{prep_id}' has {} unresolved verification error(s): {}", .errors.len(), .errors.join("; "))]
    VerificationErrors {
        prep_id: String,
        errors: Vec<String>,
    },

    /// A report request was built with invalid configuration.
    #[error("invalid report configuration: {0}")]
    InvalidReportConfig(String),

    /// The server reported the job as failed or cancelled.
    #[error("job '{job_id}' ended in state '{status}'")]
    JobFailed { job_id: String, status: String },

    /// The polling budget was exhausted before the job completed.
    #[error("timed out waiting for job to complete: {description}")]
    Timeout { description: String },

    /// Polling was stopped through the caller's cancellation token.
    #[error("cancelled while waiting for job: {description}")]
    Cancelled { description: String },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Local persistence error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Code Dx operations.
pub type Result<T> = core::result::Result<T, CodeDxError>;
