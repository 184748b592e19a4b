//! Common error types and handling for Critnotify

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Adapter-level error type for the Critnotify binaries
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl Error {
    /// Get the error code used in machine-readable output
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Unexpected(_) => "UNEXPECTED_ERROR",
            Error::Serialization(_) => "SERIALIZATION_ERROR",
            Error::Io(_) => "IO_ERROR",
            Error::Configuration(_) => "CONFIGURATION_ERROR",
            Error::Validation(_) => "VALIDATION_ERROR",
            Error::Clipboard(_) => "CLIPBOARD_ERROR",
        }
    }

    /// Process exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Validation(_) => 2,
            Error::Clipboard(_) => 3,
            Error::Configuration(_) => 78,
            Error::Unexpected(_) | Error::Serialization(_) | Error::Io(_) => 1,
        }
    }
}
