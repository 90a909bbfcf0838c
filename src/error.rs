//! Centralized error types for msgshell.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the msgshell library.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// A required input to a conversion was missing or empty.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The parsed message is structurally inconsistent.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// The Outlook message could not be parsed. The parser's failure is kept as the source.
    #[error("Unable to parse Outlook message: {source}")]
    ParseFailure { source: std::io::Error },

    /// I/O error with the associated file path.
    #[error("I/O error writing '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An export operation failed.
    #[error("Export error: {0}")]
    ExportError(String),
}

/// Convenience alias for `Result<T, ConvertError>`.
pub type Result<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Wrap a parser failure.
    pub fn parse_failure(source: std::io::Error) -> Self {
        Self::ParseFailure { source }
    }
}
