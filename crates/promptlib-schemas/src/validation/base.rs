//! Base validation trait and common utilities
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::validation::error::{ValidationError, ValidationErrors, ValidationResult};
use promptlib_core::value_kind;
use regex::Regex;
use serde_json::{Map, Value};

/// Validation mode for different use cases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// All document rules; unknown keys are ignored
    #[default]
    Standard,
    /// All document rules; unknown keys are violations
    Strict,
}

impl ValidationMode {
    /// Pick the mode from a strictness flag
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            ValidationMode::Strict
        } else {
            ValidationMode::Standard
        }
    }
}

/// Validation context for passing additional information
#[derive(Debug, Clone)]
pub struct ValidationContext {
    /// Current JSON path
    pub path: String,
    /// Validation mode
    pub mode: ValidationMode,
}

impl ValidationContext {
    /// Create a new validation context
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            path: "$".to_string(),
            mode,
        }
    }

    /// Create a child context with updated path
    pub fn child<P: AsRef<str>>(&self, path_segment: P) -> Self {
        let new_path = if self.path == "$" {
            format!("$.{}", path_segment.as_ref())
        } else {
            format!("{}.{}", self.path, path_segment.as_ref())
        };

        Self {
            path: new_path,
            mode: self.mode,
        }
    }

    /// Create a child context for array index
    pub fn child_index(&self, index: usize) -> Self {
        Self {
            path: format!("{}[{}]", self.path, index),
            mode: self.mode,
        }
    }

    /// Whether unknown keys are rejected
    pub fn is_strict(&self) -> bool {
        self.mode == ValidationMode::Strict
    }
}

/// Base trait for schema validators
pub trait SchemaValidator {
    /// The type being validated
    type Input: ?Sized;
    /// The typed value a successful validation produces
    type Output;

    /// Validate in standard mode
    fn validate(&self, input: &Self::Input) -> Result<Self::Output, ValidationErrors> {
        let context = ValidationContext::new(ValidationMode::Standard);
        self.validate_with_context(input, &context)
    }

    /// Validate in strict mode (unknown keys rejected)
    fn validate_strict(&self, input: &Self::Input) -> Result<Self::Output, ValidationErrors> {
        let context = ValidationContext::new(ValidationMode::Strict);
        self.validate_with_context(input, &context)
    }

    /// Validate with specific context and mode
    fn validate_with_context(
        &self,
        input: &Self::Input,
        context: &ValidationContext,
    ) -> Result<Self::Output, ValidationErrors>;

    /// Collect all validation errors (non-failing)
    fn collect_errors(&self, input: &Self::Input) -> ValidationErrors {
        match self.validate(input) {
            Ok(_) => ValidationErrors::new(),
            Err(errors) => errors,
        }
    }
}

/// Helper functions for common validation patterns
pub struct ValidationHelpers;

impl ValidationHelpers {
    /// Error for a required key that is absent
    pub fn missing_field(field_name: &str, context: &ValidationContext) -> ValidationError {
        ValidationError::rule(
            &context.path,
            format!("Required field {} is missing", field_name),
            "required_field",
            format!("{} to be present", field_name),
            "field is missing",
        )
    }

    /// Error for a value of the wrong JSON type
    pub fn type_mismatch(expected: &str, value: &Value, context: &ValidationContext) -> ValidationError {
        ValidationError::rule(
            &context.path,
            format!("Expected {}, found {}", expected, value_kind(value)),
            "type",
            expected,
            value_kind(value),
        )
    }

    /// Require a mapping
    pub fn require_object<'a>(
        value: &'a Value,
        context: &ValidationContext,
    ) -> ValidationResult<&'a Map<String, Value>> {
        value
            .as_object()
            .ok_or_else(|| Self::type_mismatch("object", value, context))
    }

    /// Require a string
    pub fn require_string<'a>(value: &'a Value, context: &ValidationContext) -> ValidationResult<&'a str> {
        value
            .as_str()
            .ok_or_else(|| Self::type_mismatch("string", value, context))
    }

    /// Require a string with at least one non-whitespace character
    pub fn require_non_blank(value: &Value, context: &ValidationContext) -> ValidationResult<String> {
        let text = Self::require_string(value, context)?;
        if text.trim().is_empty() {
            return Err(ValidationError::rule(
                &context.path,
                "Value cannot be empty or whitespace-only",
                "non_blank",
                "non-blank string",
                if text.is_empty() { "empty string" } else { "whitespace-only string" },
            ));
        }
        Ok(text.to_string())
    }

    /// Require a non-empty string without whitespace
    pub fn require_identifier(value: &Value, context: &ValidationContext) -> ValidationResult<String> {
        let text = Self::require_string(value, context)?;
        if text.is_empty() || text.chars().any(char::is_whitespace) {
            return Err(ValidationError::rule(
                &context.path,
                format!("Invalid identifier: '{}'", text),
                "identifier",
                "non-empty string without whitespace",
                format!("'{}'", text),
            ));
        }
        Ok(text.to_string())
    }

    /// Require a boolean
    pub fn require_bool(value: &Value, context: &ValidationContext) -> ValidationResult<bool> {
        value
            .as_bool()
            .ok_or_else(|| Self::type_mismatch("boolean", value, context))
    }

    /// Require a list whose items are all strings
    pub fn require_string_list(value: &Value, context: &ValidationContext) -> ValidationResult<Vec<String>> {
        let items = value
            .as_array()
            .ok_or_else(|| Self::type_mismatch("array", value, context))?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                Self::require_string(item, &context.child_index(i)).map(str::to_string)
            })
            .collect()
    }

    /// Validate that a string matches a pattern
    pub fn validate_pattern(
        value: &str,
        pattern: &Regex,
        description: &str,
        context: &ValidationContext,
    ) -> ValidationResult<()> {
        if pattern.is_match(value) {
            Ok(())
        } else {
            Err(ValidationError::rule(
                &context.path,
                format!("Invalid format: '{}'", value),
                "pattern",
                description,
                format!("'{}'", value),
            ))
        }
    }

    /// Validate that a string is one of allowed values
    pub fn validate_enum_value(
        value: &str,
        allowed_values: &[&str],
        field_name: &str,
        context: &ValidationContext,
    ) -> ValidationResult<()> {
        if allowed_values.contains(&value) {
            Ok(())
        } else {
            Err(ValidationError::rule(
                &context.path,
                format!("Invalid value for {}: {}", field_name, value),
                "enum_value",
                format!("one of: {}", allowed_values.join(", ")),
                value,
            ))
        }
    }

    /// Report keys outside `known`, in strict mode only
    pub fn reject_unknown_keys(
        map: &Map<String, Value>,
        known: &[&str],
        context: &ValidationContext,
    ) -> Vec<ValidationError> {
        if !context.is_strict() {
            return Vec::new();
        }

        map.keys()
            .filter(|key| !known.contains(&key.as_str()))
            .map(|key| {
                ValidationError::rule(
                    context.child(key).path,
                    format!("Unknown field {} is not allowed in strict mode", key),
                    "unknown_field",
                    format!("one of: {}", known.join(", ")),
                    key.as_str(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_context_child() {
        let context = ValidationContext::new(ValidationMode::Strict);
        let child = context.child("test");
        assert_eq!(child.path, "$.test");

        let grandchild = child.child("nested");
        assert_eq!(grandchild.path, "$.test.nested");
    }

    #[test]
    fn test_validation_context_child_index() {
        let context = ValidationContext::new(ValidationMode::Standard).child("array");
        let indexed = context.child_index(0);
        assert_eq!(indexed.path, "$.array[0]");

        let root_indexed = ValidationContext::new(ValidationMode::Standard).child_index(2);
        assert_eq!(root_indexed.child("version").path, "$[2].version");
    }

    #[test]
    fn test_require_non_blank() {
        let context = ValidationContext::new(ValidationMode::Standard);
        assert_eq!(
            ValidationHelpers::require_non_blank(&json!(" hi "), &context).unwrap(),
            " hi "
        );
        assert!(ValidationHelpers::require_non_blank(&json!(""), &context).is_err());
        assert!(ValidationHelpers::require_non_blank(&json!(" \n\t"), &context).is_err());
        let err = ValidationHelpers::require_non_blank(&json!(3), &context).unwrap_err();
        assert_eq!(err.rules().collect::<Vec<_>>(), vec!["type"]);
    }

    #[test]
    fn test_require_identifier() {
        let context = ValidationContext::new(ValidationMode::Standard);
        assert!(ValidationHelpers::require_identifier(&json!("gpt-4o-mini"), &context).is_ok());
        assert!(ValidationHelpers::require_identifier(&json!("gpt 4o"), &context).is_err());
        assert!(ValidationHelpers::require_identifier(&json!(""), &context).is_err());
    }

    #[test]
    fn test_require_string_list_reports_item_path() {
        let context = ValidationContext::new(ValidationMode::Standard).child("tags");
        let err = ValidationHelpers::require_string_list(&json!(["a", 2]), &context).unwrap_err();
        assert_eq!(err.path, "$.tags[1]");
    }

    #[test]
    fn test_unknown_keys_only_rejected_in_strict_mode() {
        let map = json!({"known": 1, "extra": 2}).as_object().cloned().unwrap();

        let standard = ValidationContext::new(ValidationMode::Standard);
        assert!(ValidationHelpers::reject_unknown_keys(&map, &["known"], &standard).is_empty());

        let strict = ValidationContext::new(ValidationMode::Strict);
        let errors = ValidationHelpers::reject_unknown_keys(&map, &["known"], &strict);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "$.extra");
    }
}
