//! Error types for dirsh

use thiserror::Error;

/// Result type alias for dirsh operations
pub type ShellResult<T> = Result<T, ShellError>;

/// Marker prefixed to every error line shown to the user.
pub const ERROR_MARKER: &str = "$[error]> ";

/// Error types for dirsh commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// Missing, empty or malformed arguments
    #[error("{0}")]
    Usage(String),

    /// Target file or directory is absent
    #[error("{0}")]
    NotFound(String),

    /// Create attempted on an existing path
    #[error("{0}")]
    AlreadyExists(String),

    /// The filesystem refused the operation
    #[error("{0}")]
    OperationFailed(String),

    /// Read or write failed with an underlying message
    #[error("{0}")]
    Io(String),

    /// Command not found
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Exit requested (not really an error)
    #[error("Exit with code {0}")]
    Exit(i32),
}

impl ShellError {
    /// The line shown to the user for this error.
    pub fn to_line(&self) -> String {
        format!("{ERROR_MARKER}{self}")
    }
}
