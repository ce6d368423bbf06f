//! Field-level rules for the nested sections of a prompt document
//!
//! Each function validates one section, records every violation it finds in
//! the shared collection and returns the typed section only when the section
//! is entirely valid.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::validation::base::{ValidationContext, ValidationHelpers};
use crate::validation::error::{ValidationError, ValidationErrors, ValidationResult};
use promptlib_core::render::is_placeholder_name;
use promptlib_core::{value_kind, InputFieldSpec, InputType, ModelConfig, OutputSpec, Status};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Keys allowed in `model`
pub const MODEL_FIELDS: [&str; 4] = ["provider", "name", "temperature", "max_tokens"];

/// Keys allowed in each input declaration
pub const INPUT_FIELDS: [&str; 4] = ["type", "required", "default", "description"];

/// Keys allowed in `output`
pub const OUTPUT_FIELDS: [&str; 5] = ["format", "rules", "schema", "constraints", "example"];

/// Inclusive temperature bounds
pub const TEMPERATURE_RANGE: (f64, f64) = (0.0, 2.0);

/// Look up an optional key, treating an explicit `null` as absent
pub(crate) fn optional_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

/// Look up a required key, recording it as missing when absent
fn required_field<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) -> Option<&'a Value> {
    let value = map.get(key);
    if value.is_none() {
        errors.add(ValidationHelpers::missing_field(key, &context.child(key)));
    }
    value
}

/// Validate `status`
pub fn validate_status(value: &Value, context: &ValidationContext) -> ValidationResult<Status> {
    let name = ValidationHelpers::require_string(value, context)?;
    ValidationHelpers::validate_enum_value(name, &Status::NAMES, "status", context)?;
    Status::from_name(name).ok_or_else(|| ValidationError::new(&context.path, "Unknown status"))
}

/// Validate the `model` section
pub fn validate_model(
    value: &Value,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) -> Option<ModelConfig> {
    let map = errors.capture(ValidationHelpers::require_object(value, context))?;
    let before = errors.len();

    let provider = required_field(map, "provider", context, errors).and_then(|v| {
        errors.capture(ValidationHelpers::require_identifier(v, &context.child("provider")))
    });
    let name = required_field(map, "name", context, errors)
        .and_then(|v| errors.capture(ValidationHelpers::require_identifier(v, &context.child("name"))));
    let temperature = required_field(map, "temperature", context, errors)
        .and_then(|v| errors.capture(validate_temperature(v, &context.child("temperature"))));
    let max_tokens = required_field(map, "max_tokens", context, errors)
        .and_then(|v| errors.capture(validate_max_tokens(v, &context.child("max_tokens"))));

    for error in ValidationHelpers::reject_unknown_keys(map, &MODEL_FIELDS, context) {
        errors.add(error);
    }

    if errors.len() > before {
        return None;
    }

    Some(ModelConfig {
        provider: provider?,
        name: name?,
        temperature: temperature?,
        max_tokens: max_tokens?,
    })
}

fn validate_temperature(value: &Value, context: &ValidationContext) -> ValidationResult<f64> {
    let temperature = value
        .as_f64()
        .ok_or_else(|| ValidationHelpers::type_mismatch("number", value, context))?;

    let (min, max) = TEMPERATURE_RANGE;
    if !(min..=max).contains(&temperature) {
        return Err(ValidationError::rule(
            &context.path,
            format!("Temperature {} is outside the allowed range", temperature),
            "range",
            format!("{} <= temperature <= {}", min, max),
            temperature.to_string(),
        ));
    }
    Ok(temperature)
}

fn validate_max_tokens(value: &Value, context: &ValidationContext) -> ValidationResult<u64> {
    let invalid = || {
        ValidationError::rule(
            &context.path,
            "max_tokens must be a positive integer",
            "positive_integer",
            "integer > 0",
            match value {
                Value::Number(n) => n.to_string(),
                other => value_kind(other).to_string(),
            },
        )
    };

    match value.as_u64() {
        Some(tokens) if tokens > 0 => Ok(tokens),
        _ => Err(invalid()),
    }
}

/// Validate the `inputs` section
pub fn validate_inputs(
    value: &Value,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) -> Option<BTreeMap<String, InputFieldSpec>> {
    let map = errors.capture(ValidationHelpers::require_object(value, context))?;

    if map.is_empty() {
        errors.add(ValidationError::rule(
            &context.path,
            "At least one input must be declared",
            "non_empty_inputs",
            "at least one input",
            "empty mapping",
        ));
        return None;
    }

    let before = errors.len();
    let inputs: BTreeMap<String, InputFieldSpec> = map
        .iter()
        .filter_map(|(key, spec)| {
            let field_context = context.child(key);
            // Templates can only reference names of this shape
            if !is_placeholder_name(key) {
                errors.add(ValidationError::rule(
                    &field_context.path,
                    format!("Input name '{}' is not a valid placeholder name", key),
                    "input_name",
                    "[A-Za-z_][A-Za-z0-9_]*",
                    key.as_str(),
                ));
            }
            validate_input_field(key, spec, &field_context, errors).map(|spec| (key.clone(), spec))
        })
        .collect();

    (errors.len() == before).then_some(inputs)
}

/// Validate one input declaration
pub fn validate_input_field(
    key: &str,
    value: &Value,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) -> Option<InputFieldSpec> {
    let map = errors.capture(ValidationHelpers::require_object(value, context))?;
    let before = errors.len();

    let input_type = required_field(map, "type", context, errors)
        .and_then(|v| errors.capture(validate_input_type(v, &context.child("type"))));

    let required = match map.get("required") {
        Some(v) => errors
            .capture(ValidationHelpers::require_bool(v, &context.child("required")))
            .unwrap_or(true),
        None => true,
    };

    let default = optional_field(map, "default").cloned();
    if let (Some(input_type), Some(default)) = (input_type, default.as_ref()) {
        if !input_type.matches(default) {
            errors.add(ValidationError::rule(
                context.child("default").path,
                format!("Default for input {} does not match its declared type", key),
                "default_type",
                input_type.as_str(),
                value_kind(default),
            ));
        }
    }

    if !required && default.is_none() {
        errors.add(ValidationError::rule(
            context.child("default").path,
            format!("Optional input {} must declare a default", key),
            "optional_requires_default",
            "default value for an input with required=false",
            "default is missing",
        ));
    }

    let description = optional_field(map, "description").and_then(|v| {
        errors
            .capture(ValidationHelpers::require_string(v, &context.child("description")))
            .map(str::to_string)
    });

    for error in ValidationHelpers::reject_unknown_keys(map, &INPUT_FIELDS, context) {
        errors.add(error);
    }

    if errors.len() > before {
        return None;
    }

    Some(InputFieldSpec {
        input_type: input_type?,
        required,
        default,
        description,
    })
}

fn validate_input_type(value: &Value, context: &ValidationContext) -> ValidationResult<InputType> {
    let name = ValidationHelpers::require_string(value, context)?;
    ValidationHelpers::validate_enum_value(name, &InputType::NAMES, "input type", context)?;
    InputType::from_name(name).ok_or_else(|| ValidationError::new(&context.path, "Unknown input type"))
}

/// Validate the `output` section
pub fn validate_output(
    value: &Value,
    context: &ValidationContext,
    errors: &mut ValidationErrors,
) -> Option<OutputSpec> {
    let map = errors.capture(ValidationHelpers::require_object(value, context))?;
    let before = errors.len();

    let format = required_field(map, "format", context, errors)
        .and_then(|v| errors.capture(ValidationHelpers::require_non_blank(v, &context.child("format"))));

    let rules = optional_field(map, "rules")
        .and_then(|v| errors.capture(validate_rules(v, &context.child("rules"))));

    let schema = optional_field(map, "schema")
        .and_then(|v| errors.capture(validate_output_schema(v, &context.child("schema"))));

    let constraints = optional_field(map, "constraints").and_then(|v| {
        errors
            .capture(ValidationHelpers::require_object(v, &context.child("constraints")))
            .cloned()
    });

    let example = optional_field(map, "example").and_then(|v| {
        errors
            .capture(ValidationHelpers::require_string(v, &context.child("example")))
            .map(str::to_string)
    });

    let has_specification = OutputSpec::SPECIFICATION_FIELDS
        .iter()
        .any(|field| optional_field(map, field).is_some());
    if !has_specification {
        errors.add(ValidationError::rule(
            &context.path,
            "Output must specify at least one of rules, schema, constraints or example",
            "output_specification",
            format!("one of: {}", OutputSpec::SPECIFICATION_FIELDS.join(", ")),
            "format only",
        ));
    }

    for error in ValidationHelpers::reject_unknown_keys(map, &OUTPUT_FIELDS, context) {
        errors.add(error);
    }

    if errors.len() > before {
        return None;
    }

    Some(OutputSpec {
        format: format?,
        rules,
        schema,
        constraints,
        example,
    })
}

fn validate_rules(value: &Value, context: &ValidationContext) -> ValidationResult<Vec<String>> {
    let rules = ValidationHelpers::require_string_list(value, context)?;
    if rules.is_empty() {
        return Err(ValidationError::rule(
            &context.path,
            "Array rules cannot be empty",
            "non_empty_array",
            "non-empty array",
            "empty array",
        ));
    }
    Ok(rules)
}

/// `output.schema` must be a mapping that compiles as a JSON Schema
fn validate_output_schema(value: &Value, context: &ValidationContext) -> ValidationResult<Value> {
    ValidationHelpers::require_object(value, context)?;
    jsonschema::validator_for(value).map_err(|e| {
        ValidationError::rule(
            &context.path,
            format!("Output schema is not a valid JSON Schema: {}", e),
            "json_schema",
            "compilable JSON Schema",
            e.to_string(),
        )
    })?;
    Ok(value.clone())
}
