//! Prompt document validation
//!
//! Turns an untyped document mapping into a [`PromptDocument`], reporting
//! every violation found rather than stopping at the first one.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::validation::base::{SchemaValidator, ValidationContext, ValidationHelpers};
use crate::validation::error::{ValidationError, ValidationErrors, ValidationResult};
use crate::validation::field_rules::{
    optional_field, validate_inputs, validate_model, validate_output, validate_status,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use promptlib_core::{DocumentVersion, PromptDocument, VersionError};
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

/// `MAJOR.MINOR.PATCH`, ASCII digits only
pub const VERSION_PATTERN: &str = r"^[0-9]+\.[0-9]+\.[0-9]+$";

/// `YYYY-MM-DDTHH:MM:SS` with an optional trailing `Z`
pub const TIMESTAMP_PATTERN: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}Z?$";

/// Validator for prompt specification documents
#[derive(Debug, Clone)]
pub struct PromptDocumentValidator {
    version_pattern: Regex,
    timestamp_pattern: Regex,
}

impl PromptDocumentValidator {
    /// Create a new document validator
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            version_pattern: Regex::new(VERSION_PATTERN)?,
            timestamp_pattern: Regex::new(TIMESTAMP_PATTERN)?,
        })
    }

    /// Validate `version`
    fn validate_version(&self, value: &Value, ctx: &ValidationContext) -> ValidationResult<DocumentVersion> {
        let text = ValidationHelpers::require_string(value, ctx)?;
        ValidationHelpers::validate_pattern(text, &self.version_pattern, "MAJOR.MINOR.PATCH", ctx)?;
        DocumentVersion::parse(text).map_err(|e| {
            let rule = match &e {
                VersionError::Overflow(_) => "version_overflow",
                _ => "version_format",
            };
            ValidationError::rule(&ctx.path, e.to_string(), rule, "MAJOR.MINOR.PATCH", text)
        })
    }

    /// Validate a `created_at`/`updated_at` timestamp
    fn validate_timestamp(&self, value: &Value, ctx: &ValidationContext) -> ValidationResult<DateTime<Utc>> {
        let text = ValidationHelpers::require_string(value, ctx)?;
        ValidationHelpers::validate_pattern(text, &self.timestamp_pattern, "YYYY-MM-DDTHH:MM:SSZ", ctx)?;

        let naive = text.strip_suffix('Z').unwrap_or(text);
        NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S")
            .map(|dt| dt.and_utc())
            .map_err(|e| {
                ValidationError::rule(
                    &ctx.path,
                    format!("Timestamp {} is not a calendar instant: {}", text, e),
                    "calendar_timestamp",
                    "valid calendar date and time",
                    text,
                )
            })
    }

    fn validate_tags(&self, value: &Value, ctx: &ValidationContext) -> ValidationResult<Vec<String>> {
        ValidationHelpers::require_string_list(value, ctx)
    }

    /// Check every required top-level key is present
    fn check_required_keys(&self, root: &Map<String, Value>, ctx: &ValidationContext, errors: &mut ValidationErrors) {
        for key in PromptDocument::REQUIRED_KEYS {
            if !root.contains_key(key) {
                errors.add(ValidationHelpers::missing_field(key, &ctx.child(key)));
            }
        }
    }
}

impl SchemaValidator for PromptDocumentValidator {
    type Input = Value;
    type Output = PromptDocument;

    fn validate_with_context(
        &self,
        raw: &Value,
        ctx: &ValidationContext,
    ) -> Result<PromptDocument, ValidationErrors> {
        let root = ValidationHelpers::require_object(raw, ctx)?;
        let mut errors = ValidationErrors::new();

        self.check_required_keys(root, ctx, &mut errors);

        let prompt_id = root.get("prompt_id").and_then(|v| {
            errors.capture(ValidationHelpers::require_non_blank(v, &ctx.child("prompt_id")))
        });
        let version = root
            .get("version")
            .and_then(|v| errors.capture(self.validate_version(v, &ctx.child("version"))));
        let status = root
            .get("status")
            .and_then(|v| errors.capture(validate_status(v, &ctx.child("status"))));
        let owner = root
            .get("owner")
            .and_then(|v| errors.capture(ValidationHelpers::require_non_blank(v, &ctx.child("owner"))));

        let description = optional_field(root, "description").and_then(|v| {
            errors
                .capture(ValidationHelpers::require_string(v, &ctx.child("description")))
                .map(str::to_string)
        });
        let tags = optional_field(root, "tags")
            .and_then(|v| errors.capture(self.validate_tags(v, &ctx.child("tags"))));
        let created_at = optional_field(root, "created_at")
            .and_then(|v| errors.capture(self.validate_timestamp(v, &ctx.child("created_at"))));
        let updated_at = optional_field(root, "updated_at")
            .and_then(|v| errors.capture(self.validate_timestamp(v, &ctx.child("updated_at"))));

        if let (Some(created), Some(updated)) = (created_at, updated_at) {
            if updated < created {
                errors.add(ValidationError::rule(
                    ctx.child("updated_at").path,
                    "updated_at precedes created_at",
                    "timestamp_order",
                    format!("updated_at >= {}", created.format("%Y-%m-%dT%H:%M:%SZ")),
                    updated.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
                ));
            }
        }

        let model = root
            .get("model")
            .and_then(|v| validate_model(v, &ctx.child("model"), &mut errors));
        let inputs = root
            .get("inputs")
            .and_then(|v| validate_inputs(v, &ctx.child("inputs"), &mut errors));
        let output = root
            .get("output")
            .and_then(|v| validate_output(v, &ctx.child("output"), &mut errors));

        let system_prompt = root.get("system_prompt").and_then(|v| {
            errors.capture(ValidationHelpers::require_non_blank(v, &ctx.child("system_prompt")))
        });
        let user_prompt_template = root.get("user_prompt_template").and_then(|v| {
            errors.capture(ValidationHelpers::require_non_blank(
                v,
                &ctx.child("user_prompt_template"),
            ))
        });

        let mut known: Vec<&str> = PromptDocument::REQUIRED_KEYS.to_vec();
        known.extend(PromptDocument::OPTIONAL_KEYS);
        for error in ValidationHelpers::reject_unknown_keys(root, &known, ctx) {
            errors.add(error);
        }

        if !errors.is_empty() {
            debug!(path = %ctx.path, violations = errors.len(), "Document rejected");
            return Err(errors);
        }

        let (
            Some(prompt_id),
            Some(version),
            Some(status),
            Some(owner),
            Some(model),
            Some(inputs),
            Some(output),
            Some(system_prompt),
            Some(user_prompt_template),
        ) = (
            prompt_id,
            version,
            status,
            owner,
            model,
            inputs,
            output,
            system_prompt,
            user_prompt_template,
        )
        else {
            return Err(ValidationError::new(&ctx.path, "Document is incomplete").into());
        };

        Ok(PromptDocument {
            prompt_id,
            version,
            status,
            owner,
            description,
            tags,
            created_at,
            updated_at,
            model,
            inputs,
            output,
            system_prompt,
            user_prompt_template,
            functions: optional_field(root, "functions").cloned(),
            examples: optional_field(root, "examples").cloned(),
            metadata: optional_field(root, "metadata").cloned(),
        })
    }
}
