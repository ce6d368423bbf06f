//! Error types for document loading operations
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::validation::ValidationErrors;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Failures that leave the caller with no document at all
#[derive(Error, Debug)]
pub enum LoaderError {
    /// The file does not exist
    #[error("Document file not found: '{path}'")]
    NotFound { path: PathBuf },

    /// The path exists but is not a regular file
    #[error("Path is not a file: '{path}'")]
    NotAFile { path: PathBuf },

    /// A catalog root that is not a directory
    #[error("Path is not a directory: '{path}'")]
    NotADirectory { path: PathBuf },

    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// The file parsed to nothing
    #[error("Document file is empty: '{path}'")]
    EmptyDocument { path: PathBuf },

    /// The file parsed to something other than a mapping
    #[error("Document root in '{path}' must be a mapping, found {found}")]
    NotAMapping { path: PathBuf, found: String },
}

impl LoaderError {
    /// Create an I/O error with path context, folding not-found into its own kind
    pub fn io_error(path: PathBuf, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::IoError {
                path,
                source: error,
            }
        }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse_error(path: PathBuf, error: serde_yaml::Error) -> Self {
        Self::YamlParseError {
            path,
            source: error,
        }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse_error(path: PathBuf, error: serde_json::Error) -> Self {
        Self::JsonParseError {
            path,
            source: error,
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(path: PathBuf) -> Self {
        Self::UnsupportedFormat { path }
    }

    /// Path the error refers to
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::NotAFile { path }
            | Self::NotADirectory { path }
            | Self::IoError { path, .. }
            | Self::YamlParseError { path, .. }
            | Self::JsonParseError { path, .. }
            | Self::UnsupportedFormat { path }
            | Self::EmptyDocument { path }
            | Self::NotAMapping { path, .. } => path,
        }
    }
}

/// Failure to load a validated document from a file
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be turned into a raw mapping
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// The raw mapping is not a valid document
    #[error("Invalid prompt document '{path}': {errors}")]
    Invalid {
        path: PathBuf,
        #[source]
        errors: ValidationErrors,
    },
}

impl LoadError {
    /// Validation errors, if the file parsed but failed validation
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            LoadError::Invalid { errors, .. } => Some(errors),
            LoadError::Loader(_) => None,
        }
    }
}

impl From<LoadError> for promptlib_core::Error {
    fn from(error: LoadError) -> Self {
        match error {
            LoadError::Invalid { errors, .. } => errors.into(),
            LoadError::Loader(source) => promptlib_core::Error::SchemaViolation {
                message: source.to_string(),
                source: Some(anyhow::Error::new(source)),
            },
        }
    }
}
