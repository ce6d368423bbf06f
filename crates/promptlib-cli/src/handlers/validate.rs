//! Validation command handler

use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::{redaction, timing::Timer};
use crate::output::OutputWriter;
use promptlib_core::PromptDocument;
use promptlib_schemas::{load_raw, validate_document, ValidationConfig, ValidationError, ValidationMode};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Machine-readable outcome of `validate`
#[derive(Debug, Serialize)]
struct ValidationReport<'a> {
    file: &'a Path,
    valid: bool,
    strict: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [ValidationError]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    document: Option<serde_json::Value>,
}

/// Handle the validate command
#[instrument(skip(config, output), fields(file = %args.file.display(), strict = args.strict))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &format!("file: {}", args.file.display()));
    info!("Starting validation process");
    output.info(&format!("Validating prompt document: {}", args.file.display()))?;

    let raw = load_raw(&args.file)?;
    debug!("Document parsed, running validation rules");

    let strict = args.strict || config.strict;
    let validation_config = ValidationConfig {
        mode: ValidationMode::from_strict(strict),
        max_errors: args.max_errors,
    };

    let result = {
        let _validation_timer = Timer::new("schema_validation");
        validate_document(&raw, &validation_config)
    };

    match result {
        Ok(document) => {
            info!(prompt = %document.qualified_id(), "Validation completed successfully");
            let detail = args.detailed.then(|| redacted(&document)).transpose()?;

            if output.is_human() {
                output.success(&format!("✓ {} is valid", document.qualified_id()))?;
                if let Some(detail) = &detail {
                    output.section("Document Details")?;
                    output.data(detail)?;
                }
                Ok(())
            } else {
                output.data(&ValidationReport {
                    file: &args.file,
                    valid: true,
                    strict,
                    prompt: Some(document.qualified_id()),
                    errors: None,
                    document: detail,
                })
            }
        }
        Err(errors) => {
            warn!(violations = errors.len(), "Validation failed");

            if output.is_human() {
                output.error(&format!("✗ {} is not a valid prompt document", args.file.display()))?;
                output.validation_errors(&errors)?;
            } else {
                output.data(&ValidationReport {
                    file: &args.file,
                    valid: false,
                    strict,
                    prompt: None,
                    errors: Some(&errors.errors),
                    document: None,
                })?;
            }

            Err(Error::ValidationFailed {
                path: args.file.clone(),
                count: errors.len(),
            })
        }
    }
}

/// Document as JSON with secret-looking values masked
fn redacted(document: &PromptDocument) -> Result<serde_json::Value> {
    let mut value = serde_json::to_value(document)?;
    redaction::redact_json_value(&mut value);
    Ok(value)
}
