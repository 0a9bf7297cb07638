//! Error taxonomy for the markup pipeline

use std::path::PathBuf;

/// Errors raised by the pipeline stages and their I/O plumbing.
///
/// Content never produces an error: malformed lines degrade into best-effort
/// passthrough. Everything here is fatal for the run.
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    /// A required pattern or mode is missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A supplied regular expression failed to compile
    #[error("Invalid pattern `{pattern}`: {message}")]
    PatternCompile { pattern: String, message: String },

    /// Opening, reading or writing a named input/output failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A TOML configuration file could not be parsed
    #[error("Invalid config file {}: {message}", path.display())]
    ConfigFile { path: PathBuf, message: String },
}

impl MarkupError {
    pub fn config(msg: impl Into<String>) -> Self {
        MarkupError::Configuration(msg.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MarkupError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, MarkupError>;
