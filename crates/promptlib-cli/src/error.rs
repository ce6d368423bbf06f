//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! the failure modes of the CLI application.

use colored::Colorize;
use promptlib_core::VersionError;
use promptlib_schemas::{LoadError, LoaderError};
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from promptlib-core
    #[error("{0}")]
    Core(#[from] promptlib_core::Error),

    /// A document could not be loaded or failed validation
    #[error("{0}")]
    Load(#[from] LoadError),

    /// `validate` found violations; they have already been reported
    #[error("Validation of {} failed with {} violation(s)", path.display(), count)]
    ValidationFailed { path: PathBuf, count: usize },

    /// A `-i` or `--inputs` value that cannot be used
    #[error("Invalid input '{key}': {message}")]
    InvalidInput { key: String, message: String },

    /// Malformed version or version range argument
    #[error("Invalid version: {0}")]
    Version(#[from] VersionError),

    /// No catalog entry matched a lookup
    #[error("No usable version of prompt '{prompt_id}' found in {}", dir.display())]
    PromptNotFound { prompt_id: String, dir: PathBuf },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The tracing subscriber could not be installed
    #[error("Failed to initialize logging: {message}")]
    Logging {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<LoaderError> for Error {
    fn from(error: LoaderError) -> Self {
        Self::Load(LoadError::Loader(error))
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Wrap a logging setup failure
    pub fn logging<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Logging {
            message: message.into(),
            source: anyhow::Error::new(source),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Core(_) => 2,
            Self::Load(LoadError::Loader(_)) => 3,
            Self::Load(LoadError::Invalid { .. }) | Self::ValidationFailed { .. } => 4,
            Self::Config(_) => 5,
            Self::InvalidInput { .. } | Self::Version(_) => 6,
            Self::PromptNotFound { .. } => 7,
            Self::Logging { .. } => 8,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
        }
    }

    /// Check if this error should display usage help
    pub fn should_show_help(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    let label = if use_color {
        "Error:".red().bold().to_string()
    } else {
        "Error:".to_string()
    };

    // Itemize validation failures instead of one long line
    if let Error::Load(LoadError::Invalid { path, errors }) = error {
        let mut out = format!(
            "{} Invalid prompt document {}: {} violation(s)",
            label,
            path.display(),
            errors.len()
        );
        for violation in errors.iter() {
            let location = if use_color {
                violation.path.yellow().to_string()
            } else {
                violation.path.clone()
            };
            out.push_str(&format!("\n  - {}: {}", location, violation.message));
        }
        return out;
    }

    format!("{} {}", label, error)
}
