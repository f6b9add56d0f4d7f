use thiserror::Error;

/// Result type alias for crtsh operations
pub type Result<T> = std::result::Result<T, CrtshError>;

/// Errors that can occur when querying the certificate-transparency source
#[derive(Error, Debug)]
pub enum CrtshError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// The endpoint answered with a non-success status
    #[error("API error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Response body or status reason
        message: String,
    },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl CrtshError {
    /// Returns true if the failure happened on the network path
    /// rather than in decoding or configuration
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Timeout(_))
    }

    /// Returns the HTTP status code if this is an API error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
