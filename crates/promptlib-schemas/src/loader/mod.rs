//! Document loading from YAML and JSON files
//!
//! Loading is two steps: the [`DocumentParser`] turns a file into a raw
//! mapping, then the validator turns the mapping into a [`PromptDocument`].
//! A file that fails the first step never reaches the validator.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod catalog;
pub mod error;
pub mod parser;

pub use catalog::{CatalogEntry, PromptCatalog, RejectReason, RejectedEntry};
pub use error::{LoadError, LoaderError, LoaderResult};
pub use parser::{DocumentParser, Format};

use crate::validation::{validate_document, ValidationConfig};
use promptlib_core::PromptDocument;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Read a file into a raw document mapping
pub fn load_raw(path: impl AsRef<Path>) -> LoaderResult<Value> {
    DocumentParser::new().parse_file(path.as_ref())
}

/// Load and validate a document with standard validation
pub fn load_document(path: impl AsRef<Path>) -> Result<PromptDocument, LoadError> {
    load_document_with_config(path, &ValidationConfig::standard())
}

/// Load and validate a document under `config`
pub fn load_document_with_config(
    path: impl AsRef<Path>,
    config: &ValidationConfig,
) -> Result<PromptDocument, LoadError> {
    let path = path.as_ref();
    let raw = load_raw(path)?;

    let document = validate_document(&raw, config).map_err(|errors| LoadError::Invalid {
        path: path.to_path_buf(),
        errors,
    })?;

    debug!(path = %path.display(), prompt = %document.qualified_id(), "Loaded prompt document");
    Ok(document)
}
