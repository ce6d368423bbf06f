//! Promptlib Core - prompt engine for versioned prompt specification documents
//!
//! This crate turns a validated [`PromptDocument`] into final prompt text and
//! a provider-specific request body.
//!
//! # Main Components
//!
//! - **Error Handling**: Error types using `thiserror` and `anyhow`
//! - **Core Types**: Typed documents, inputs, output contracts and versions
//! - **Rendering**: Input resolution and `{{name}}` template substitution
//! - **Providers**: Request bodies for OpenAI, Groq and Anthropic
//! - **Metadata**: Tracking projection of a document
//!
//! Documents are produced by the validator in `promptlib-schemas`.
//!
//! # Example
//!
//! ```no_run
//! use promptlib_core::{build_request, render_with_inputs, PromptDocument, Result};
//! use serde_json::{Map, Value};
//!
//! fn example(doc: &PromptDocument, inputs: &Map<String, Value>) -> Result<()> {
//!     let prompt = render_with_inputs(doc, inputs)?;
//!     let payload = build_request(doc, &prompt)?;
//!     println!("{}", payload.body_pretty()?);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod metadata;
pub mod providers;
pub mod render;
pub mod types;
pub mod version;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use metadata::{extract, Metadata};
pub use providers::{build_request, PromptParts, Provider, ProviderAdapter, RequestPayload};
pub use render::{
    render, render_full, render_with_inputs, resolve, PromptRenderer, Renderer, ResolvedInputs,
    Template,
};
pub use types::{
    value_kind, InputFieldSpec, InputType, ModelConfig, OutputSpec, PromptDocument, Status,
};
pub use version::{DocumentVersion, VersionError, VersionRange};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
