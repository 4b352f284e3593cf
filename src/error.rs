//! Error types for `sevlog`.
//!
//! Emission never fails from the caller's point of view, so everything here
//! belongs to configuration loading and the command-line front end.

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Process exit codes used by the `sevlog` binary and by fatal emissions.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// A fatal-severity message was logged
    pub const FATAL: i32 = 1;

    /// Configuration error (bad level, format, sink or settings file)
    pub const CONFIG_ERROR: i32 = 2;

    /// I/O error (sink file could not be opened, output not serializable)
    pub const IO_ERROR: i32 = 3;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `sevlog` front-end operations.
#[derive(Debug, Error)]
pub enum SevlogError {
    /// Configuration parsing or validation error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SevlogError {
    /// Returns the exit code the binary reports for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(ConfigError::SinkOpen { .. }) => ExitCode::IO_ERROR,
            Self::Config(_) => ExitCode::CONFIG_ERROR,
            Self::Json(_) => ExitCode::IO_ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Errors raised while turning text into configuration values.
///
/// The configuration store itself accepts any value; these only come from
/// parsing names, masks, sink specifications and settings files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field has a value that cannot be parsed
    #[error("invalid value for '{field}': got '{value}', expected {expected}")]
    InvalidValue {
        /// Name of the field
        field: String,
        /// The text provided
        value: String,
        /// Description of what was expected
        expected: String,
    },

    /// Settings file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Settings file could not be parsed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the settings file
        path: PathBuf,
        /// Error message from the parser
        message: String,
    },

    /// A file sink could not be opened
    #[error("cannot open sink {path}: {source}")]
    SinkOpen {
        /// Path of the sink file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
