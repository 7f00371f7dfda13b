//! Error types for tokenpad
//!
//! Uses `thiserror` for library errors. The binary wraps these in `anyhow`.

use thiserror::Error;

use crate::domain::ports::virtual_fs::FsError;
use crate::domain::value_objects::PathError;

/// Result type alias for tokenpad operations
pub type PadResult<T> = Result<T, PadError>;

/// Main error type for tokenpad operations
#[derive(Error, Debug)]
pub enum PadError {
    /// Pipeline configuration could not be parsed or is malformed
    #[error("invalid pipeline config {file}: {message}")]
    InvalidConfig { file: String, message: String },

    /// A token source file is not valid JSON
    #[error("invalid token file {file}: {message}")]
    InvalidTokens { file: String, message: String },

    /// Platform file entry names a format the pipeline cannot render
    #[error("unknown format '{format}' for platform '{platform}'")]
    UnknownFormat { format: String, platform: String },

    /// A token refers to another token that cannot be resolved
    #[error("unresolved reference '{reference}' in token '{token}': {reason}")]
    UnresolvedReference {
        token: String,
        reference: String,
        reason: String,
    },

    /// A `source` glob could not be compiled
    #[error("invalid source pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Tool configuration (`tokenpad.toml`) could not be parsed
    #[error("invalid settings in {file}: {message}")]
    InvalidSettings { file: String, message: String },

    /// Virtual filesystem failure
    #[error(transparent)]
    Fs(#[from] FsError),

    /// Rejected path
    #[error(transparent)]
    Path(#[from] PathError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File watcher failure
    #[error("watch error: {0}")]
    Watch(String),
}
