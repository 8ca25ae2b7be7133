//! Unified error types for djflow
//!
//! Error strategy:
//! - Sequencing itself never fails: ineligible tracks are dropped, unknown
//!   strategy names fall back to the default, degenerate inputs have defined
//!   results
//! - Errors only come from the surfaces around the engine: option
//!   validation, strict strategy parsing, and reading/writing JSON files
//!
//! All errors include actionable suggestions where possible.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for djflow operations
#[derive(Debug, Error)]
pub enum DjflowError {
    #[error("Cannot read tracks from '{path}': {reason}\n  Tip: The input must be a JSON array of tracks (title, bpm, camelot, energy, ...)")]
    InputError { path: PathBuf, reason: String },

    #[error("Cannot write output to '{path}': {reason}\n  Tip: Check write permissions for the output directory")]
    OutputError { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Unknown strategy '{0}'\n  Tip: Run with --list-strategies to see the available names")]
    UnknownStrategy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for djflow operations
pub type Result<T> = std::result::Result<T, DjflowError>;

impl DjflowError {
    /// Create an input error for a file that could not be loaded
    pub fn input_error(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        DjflowError::InputError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an output error, checking for common issues
    pub fn output_error(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        let reason = match err.kind() {
            std::io::ErrorKind::PermissionDenied => {
                format!("Permission denied. Check that you have write access to {}", path.display())
            }
            std::io::ErrorKind::NotFound => {
                format!("Directory does not exist: {}", path.parent().map(|p| p.display().to_string()).unwrap_or_default())
            }
            _ => err.to_string(),
        };
        DjflowError::OutputError { path, reason }
    }

    /// Create a configuration error for an option outside its range
    pub fn out_of_range(option: &str, value: impl std::fmt::Display, range: &str) -> Self {
        DjflowError::ConfigError(format!(
            "{} = {} is out of range (expected {})",
            option, value, range
        ))
    }
}
