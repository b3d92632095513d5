use thiserror::Error;

/// Error type for biblio operations
#[derive(Debug, Error)]
pub enum BiblioError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Call to {procedure} failed: {message}")]
    CallFailed { procedure: String, message: String },

    #[error("Call to {procedure} timed out after {seconds}s")]
    TimedOut { procedure: String, seconds: u64 },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for biblio operations
pub type Result<T> = std::result::Result<T, BiblioError>;
