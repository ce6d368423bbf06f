//! Error types for the promptlib core library
//!
//! Every failure a caller can observe while turning a document into a request
//! is one of these variants. None of them is recovered from inside the core.

use thiserror::Error;

use crate::providers::Provider;

/// Main error type for promptlib operations
#[derive(Error, Debug)]
pub enum Error {
    /// One or more structural or semantic defects in a prompt document
    #[error("Schema validation failed: {message}")]
    SchemaViolation {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Declared required inputs absent from the caller-supplied values
    #[error("Required input(s) missing: {}", keys.join(", "))]
    RequiredInputMissing { keys: Vec<String> },

    /// A caller-supplied value does not match the declared input type
    #[error("Invalid value for input '{key}': expected {expected}, found {actual}")]
    InvalidInputValue {
        key: String,
        expected: String,
        actual: String,
    },

    /// The user template references a name that was never resolved
    #[error("Template references undeclared variable '{name}'")]
    UndeclaredTemplateVariable { name: String },

    /// `model.provider` is not one of the known providers
    #[error(
        "Unsupported provider '{provider}', expected one of: {}",
        Provider::NAMES.join(", ")
    )]
    UnsupportedProvider { provider: String },

    /// JSON serialization errors while building payloads
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a schema violation without an itemized source
    pub fn schema_violation(message: impl Into<String>) -> Self {
        Error::SchemaViolation {
            message: message.into(),
            source: None,
        }
    }

    /// Names of the inputs involved in this error, if any
    pub fn input_keys(&self) -> Vec<&str> {
        match self {
            Error::RequiredInputMissing { keys } => keys.iter().map(String::as_str).collect(),
            Error::InvalidInputValue { key, .. } => vec![key.as_str()],
            Error::UndeclaredTemplateVariable { name } => vec![name.as_str()],
            _ => Vec::new(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
