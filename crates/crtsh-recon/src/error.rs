use thiserror::Error;

/// Result type alias for resolution operations
pub type ReconResult<T> = std::result::Result<T, ReconError>;

/// Errors from the resolver pool and its lookups
#[derive(Error, Debug)]
pub enum ReconError {
    /// DNS resolution error
    #[error("DNS error: {0}")]
    Dns(String),

    /// The configured DNS server could not be parsed or resolved
    #[error("invalid DNS server: {0}")]
    InvalidServer(String),

    /// A pool worker stopped before the queue drained
    #[error("worker failure: {0}")]
    Worker(String),
}

