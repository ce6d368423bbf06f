//! Promptlib Schemas - validation, loading and cataloging of prompt documents
//!
//! This crate turns untyped prompt specification documents into the typed
//! [`promptlib_core::PromptDocument`]:
//!
//! - **Validation**: explicit per-field rules reporting every violation with
//!   its JSON path
//! - **Validation Modes**: Standard (unknown keys ignored) and Strict
//! - **Batch Processing**: validation of many documents with indexed paths
//! - **Loading**: YAML and JSON files into raw mappings
//! - **Catalog**: a directory of documents indexed by `prompt_id` and version
//!
//! ## Quick Start
//!
//! ```rust
//! use promptlib_schemas::{create_document_validator, SchemaValidator};
//! use serde_json::json;
//!
//! let validator = create_document_validator().unwrap();
//!
//! let raw = json!({
//!     "prompt_id": "summarize",
//!     "version": "0.3.1",
//!     "status": "staging",
//!     "owner": "research",
//!     "model": {"provider": "anthropic", "name": "claude-3-haiku", "temperature": 0.0, "max_tokens": 256},
//!     "inputs": {"text": {"type": "string"}},
//!     "output": {"format": "text", "rules": ["Three bullet points."]},
//!     "system_prompt": "You summarize text.",
//!     "user_prompt_template": "{{text}}"
//! });
//!
//! match validator.validate(&raw) {
//!     Ok(doc) => println!("Valid document {}", doc.qualified_id()),
//!     Err(errors) => println!("{}", errors),
//! }
//! ```
//!
//! ## Document Rules
//!
//! - Every required top-level key must be present
//! - `version` is `MAJOR.MINOR.PATCH`; timestamps are `YYYY-MM-DDTHH:MM:SS[Z]`
//! - `updated_at` must not precede `created_at`
//! - Optional inputs must declare a default matching their type
//! - `output` needs at least one of rules, schema, constraints or example
//! - `output.schema` must compile as a JSON Schema
//! - Strict mode rejects unknown keys
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod loader;
pub mod validation;

// Re-export commonly used types for convenience
pub use loader::{
    load_document, load_document_with_config, load_raw, CatalogEntry, DocumentParser, Format,
    LoadError, LoaderError, LoaderResult, PromptCatalog, RejectReason, RejectedEntry,
};
pub use validation::{
    create_document_validator, validate_document, validate_documents_batch, PromptDocumentValidator,
    SchemaValidator, ValidationConfig, ValidationContext, ValidationError, ValidationErrors,
    ValidationHelpers, ValidationMode, ValidationResult, Violation,
};
