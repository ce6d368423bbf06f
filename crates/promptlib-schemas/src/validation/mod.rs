//! Validation module for prompt specification documents
//!
//! Validation is a set of explicit per-field rules composed into a document
//! validator. Two modes are supported:
//!
//! - **Standard**: every document rule; unknown keys are ignored
//! - **Strict**: every document rule; unknown keys are violations
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod base;
pub mod document;
pub mod error;
pub mod field_rules;

// Re-export commonly used types
pub use base::{SchemaValidator, ValidationContext, ValidationHelpers, ValidationMode};
pub use document::PromptDocumentValidator;
pub use error::{ValidationError, ValidationErrors, ValidationResult, Violation};

use promptlib_core::PromptDocument;
use serde_json::Value;

/// Convenience function to create a document validator
///
/// # Examples
///
/// ```rust
/// use promptlib_schemas::validation::{create_document_validator, SchemaValidator};
/// use serde_json::json;
///
/// let validator = create_document_validator().unwrap();
/// let raw = json!({
///     "prompt_id": "greeting",
///     "version": "1.0.0",
///     "status": "draft",
///     "owner": "docs",
///     "model": {"provider": "openai", "name": "gpt-4o-mini", "temperature": 0.2, "max_tokens": 64},
///     "inputs": {"name": {"type": "string"}},
///     "output": {"format": "text", "rules": ["One sentence."]},
///     "system_prompt": "You greet people.",
///     "user_prompt_template": "Greet {{name}}."
/// });
///
/// assert!(validator.validate(&raw).is_ok());
/// ```
pub fn create_document_validator() -> Result<PromptDocumentValidator, ValidationErrors> {
    PromptDocumentValidator::new().map_err(|e| {
        ValidationErrors::from(ValidationError::new(
            "$",
            format!("Failed to create validator: {}", e),
        ))
    })
}

/// Validation configuration
#[derive(Debug, Clone, Default)]
pub struct ValidationConfig {
    /// Validation mode to use
    pub mode: ValidationMode,
    /// Maximum number of errors to report (0 = unlimited)
    pub max_errors: usize,
}

impl ValidationConfig {
    /// Create a configuration for standard validation
    pub fn standard() -> Self {
        Self {
            mode: ValidationMode::Standard,
            max_errors: 0,
        }
    }

    /// Create a configuration for strict validation
    pub fn strict() -> Self {
        Self {
            mode: ValidationMode::Strict,
            max_errors: 0,
        }
    }

    /// Set maximum number of errors to report
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

/// Validate one raw document under `config`
pub fn validate_document(raw: &Value, config: &ValidationConfig) -> Result<PromptDocument, ValidationErrors> {
    let validator = create_document_validator()?;
    let context = ValidationContext::new(config.mode);

    validator.validate_with_context(raw, &context).map_err(|mut errors| {
        errors.truncate(config.max_errors);
        errors
    })
}

/// Batch validation for multiple raw documents
///
/// Errors of each failing document carry its index (`$[1].version`).
pub fn validate_documents_batch(
    raws: &[Value],
    config: &ValidationConfig,
) -> Result<Vec<PromptDocument>, ValidationErrors> {
    let validator = create_document_validator()?;
    let context = ValidationContext::new(config.mode);

    let mut documents = Vec::with_capacity(raws.len());
    let mut errors = ValidationErrors::new();

    for (i, raw) in raws.iter().enumerate() {
        match validator.validate_with_context(raw, &context.child_index(i)) {
            Ok(doc) => documents.push(doc),
            Err(doc_errors) => {
                errors.extend(doc_errors);

                if config.max_errors > 0 && errors.len() >= config.max_errors {
                    break;
                }
            }
        }
    }

    errors.truncate(config.max_errors);
    errors.into_result()?;
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(version: &str) -> Value {
        json!({
            "prompt_id": "batch",
            "version": version,
            "status": "draft",
            "owner": "tests",
            "model": {"provider": "groq", "name": "llama-3.1-8b-instant", "temperature": 0.0, "max_tokens": 32},
            "inputs": {"x": {"type": "int"}},
            "output": {"format": "text", "example": "42"},
            "system_prompt": "S",
            "user_prompt_template": "{{x}}"
        })
    }

    #[test]
    fn test_create_validator() {
        assert!(create_document_validator().is_ok());
    }

    #[test]
    fn test_validation_config_defaults() {
        let config = ValidationConfig::default();
        assert_eq!(config.mode, ValidationMode::Standard);
        assert_eq!(config.max_errors, 0);

        let strict = ValidationConfig::strict().with_max_errors(5);
        assert_eq!(strict.mode, ValidationMode::Strict);
        assert_eq!(strict.max_errors, 5);
    }

    #[test]
    fn test_batch_prefixes_paths_with_index() {
        let raws = vec![document("1.0.0"), document("1.0"), document("2.0.0")];
        let errors = validate_documents_batch(&raws, &ValidationConfig::standard()).unwrap_err();
        assert_eq!(errors.paths(), vec!["$[1].version"]);

        let docs = validate_documents_batch(&raws[..1], &ValidationConfig::standard()).unwrap();
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn test_max_errors_caps_report() {
        let raw = json!({"prompt_id": "only"});
        let all = validate_document(&raw, &ValidationConfig::standard()).unwrap_err();
        assert_eq!(all.len(), 8);

        let capped = validate_document(&raw, &ValidationConfig::standard().with_max_errors(3)).unwrap_err();
        assert_eq!(capped.len(), 3);
    }

    #[test]
    fn test_strict_mode_rejects_unknown_keys() {
        let mut raw = document("1.0.0");
        raw["extra"] = json!(true);
        raw["model"]["top_p"] = json!(0.9);

        assert!(validate_document(&raw, &ValidationConfig::standard()).is_ok());

        let errors = validate_document(&raw, &ValidationConfig::strict()).unwrap_err();
        assert!(errors.has_path("$.extra"));
        assert!(errors.has_path("$.model.top_p"));
        assert_eq!(errors.len(), 2);
    }
}
