// Tests for output formatting
//
// Human output is checked line by line; machine formats are parsed back.

use super::test_support::capture;
use super::*;
use pretty_assertions::assert_eq;
use promptlib_schemas::Violation;
use serde_json::json;

fn sample_errors() -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(ValidationError::with_violations(
        "$.model.temperature",
        "Temperature out of range",
        vec![Violation {
            rule: "range".to_string(),
            expected: "0.0..=2.0".to_string(),
            actual: "3.5".to_string(),
        }],
    ));
    errors.add(ValidationError::new("$.owner", "Missing required field 'owner'"));
    errors
}

#[test]
fn test_human_validation_errors() {
    let formatted = OutputFormat::Human.format_validation_errors(&sample_errors()).unwrap();

    assert_eq!(
        formatted,
        "✗ Validation Failed - 2 Error(s)\n\n\
         1. Path: $.model.temperature\n   \
         Message: Temperature out of range\n   \
         • Rule: range\n     \
         Expected: 0.0..=2.0\n     \
         Actual: 3.5\n\n\
         2. Path: $.owner\n   \
         Message: Missing required field 'owner'\n\n"
    );
}

#[test]
fn test_machine_validation_errors_round_trip() {
    let errors = sample_errors();

    let json = OutputFormat::Json.format_validation_errors(&errors).unwrap();
    let parsed: ValidationErrors = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, errors);

    let yaml = OutputFormat::Yaml.format_validation_errors(&errors).unwrap();
    let parsed: ValidationErrors = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed, errors);
}

#[test]
fn test_messages_only_in_human_format() {
    let (mut human, buffer) = capture(OutputFormat::Human);
    human.info("scanning").unwrap();
    human.success("done").unwrap();
    human.warning("careful").unwrap();
    assert_eq!(buffer.contents(), "INFO: scanning\ndone\nWARNING: careful\n");

    let (mut machine, buffer) = capture(OutputFormat::Json);
    machine.info("scanning").unwrap();
    machine.success("done").unwrap();
    machine.data(&json!({"ok": true})).unwrap();
    assert_eq!(buffer.contents(), "{\"ok\":true}\n");
}

#[test]
fn test_quiet_suppresses_info_but_not_errors() {
    let buffer = test_support::SharedBuffer::default();
    let mut output = OutputWriter::with_writer(OutputFormat::Human, false, true, 0, Box::new(buffer.clone()));

    output.info("hidden").unwrap();
    output.section("Hidden").unwrap();
    output.error("shown").unwrap();
    assert_eq!(buffer.contents(), "ERROR: shown\n");
}

#[test]
fn test_table_alignment() {
    let (mut output, buffer) = capture(OutputFormat::Human);
    output
        .table(
            &["PROMPT", "VERSION"],
            vec![
                vec!["summarize".to_string(), "1.0.0".to_string()],
                vec!["qa".to_string(), "12.0.1".to_string()],
            ],
        )
        .unwrap();

    assert_eq!(
        buffer.contents(),
        "PROMPT    │ VERSION\n\
         ──────────┼────────\n\
         summarize │ 1.0.0\n\
         qa        │ 12.0.1\n"
    );
}

#[test]
fn test_yaml_data_is_not_double_terminated() {
    let (mut output, buffer) = capture(OutputFormat::Yaml);
    output.data(&json!({"prompt_id": "x"})).unwrap();
    assert_eq!(buffer.contents(), "prompt_id: x\n");
}

#[test]
fn test_field_lines() {
    let (mut output, buffer) = capture(OutputFormat::Human);
    output.field("owner", "platform-team").unwrap();
    assert_eq!(buffer.contents(), "     owner: platform-team\n");
}
