//! Error types for the SharePoint drive client.

use thiserror::Error;

/// Errors that can occur when interacting with a SharePoint document library.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Access token was rejected or expired
    #[error("Authentication required or token expired")]
    Unauthorized,

    /// Token acquisition failed or produced no usable token
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Site URL did not match the expected shape
    #[error("Invalid site URL: {0}")]
    InvalidSiteUrl(String),

    /// Site or drive lookup during construction returned an error payload
    #[error("Failed to resolve {stage}: {message}")]
    SiteResolution {
        stage: &'static str,
        message: String,
    },

    /// Remote item does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Remote operation conflicted with an existing item
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Remote item is locked
    #[error("File locked: {0}")]
    Locked(String),

    /// Caller lacks permission for the operation
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Request was rejected as malformed
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Listing exceeded the enumeration cap
    #[error("Too many results: {count} entries exceeds the {limit} listing cap (partition the folder)")]
    TooManyResults { count: usize, limit: usize },

    /// Item descriptor had no direct-download URL
    #[error("No download URL in item descriptor for {0}")]
    MissingDownloadUrl(String),

    /// Local file to upload does not exist
    #[error("Local file not found: {0}")]
    FileNotFound(String),

    /// Failed to parse a server response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Local IO error during upload/download
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Server returned an error status not covered by a specific kind
    #[error("Server error ({status}): {message}")]
    Http { status: u16, message: String },
}

impl ClientError {
    /// Map an HTTP error status to the matching error kind.
    pub(crate) fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 => Self::BadRequest(message),
            401 => Self::Unauthorized,
            403 => Self::PermissionDenied(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            423 => Self::Locked(message),
            _ => Self::Http { status, message },
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
