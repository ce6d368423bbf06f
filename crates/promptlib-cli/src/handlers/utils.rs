//! Shared utilities for command handlers

use crate::cli::InputArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use promptlib_core::{value_kind, PromptDocument};
use promptlib_schemas::{load_document_with_config, DocumentParser, ValidationConfig, ValidationMode};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Validation settings for a command, honoring the configured default
pub fn validation_config(strict: bool, config: &Config) -> ValidationConfig {
    ValidationConfig {
        mode: ValidationMode::from_strict(strict || config.strict),
        max_errors: 0,
    }
}

/// Load and validate a prompt document
pub fn load_prompt(path: &Path, strict: bool, config: &Config) -> Result<PromptDocument> {
    let _timer = Timer::with_details("document_loading", &path.display().to_string());
    let document = load_document_with_config(path, &validation_config(strict, config))?;
    Ok(document)
}

/// Collect caller inputs: the `--inputs` file first, then `-i` overrides.
///
/// `-i` values are converted to the declared type of their input, so a
/// `-i` key the document does not declare is rejected.
pub fn collect_inputs(doc: &PromptDocument, args: &InputArgs) -> Result<Map<String, Value>> {
    let mut provided = match &args.inputs_file {
        Some(path) => match DocumentParser::new().parse_file(path)? {
            Value::Object(map) => map,
            // parse_file only returns mappings
            other => {
                return Err(Error::invalid_input(
                    path.display().to_string(),
                    format!("expected a mapping, found {}", value_kind(&other)),
                ))
            }
        },
        None => Map::new(),
    };

    for (key, raw) in &args.input {
        let spec = doc.input(key).ok_or_else(|| {
            Error::invalid_input(
                key,
                format!(
                    "not declared by {}; declared inputs: {}",
                    doc.qualified_id(),
                    doc.inputs.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
                ),
            )
        })?;

        let value = spec.input_type.parse_str(raw).ok_or_else(|| {
            Error::invalid_input(key, format!("expected {}, found '{}'", spec.input_type, raw))
        })?;

        if provided.insert(key.clone(), value).is_some() {
            debug!(input = %key, "Command-line value overrides inputs file");
        }
    }

    Ok(provided)
}

/// Write `content` to `path` and report it
pub fn save_output(path: &Path, content: &str, output: &mut OutputWriter) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    debug!(path = %path.display(), bytes = content.len(), "Saved output");
    output.success(&format!("✓ Output saved to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{write_file, RENAME_DOCUMENT};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::path::PathBuf;

    fn document(dir: &Path) -> PromptDocument {
        let path = write_file(dir, "autorename.yml", RENAME_DOCUMENT);
        load_prompt(&path, false, &Config::default()).unwrap()
    }

    fn args(input: &[(&str, &str)], inputs_file: Option<PathBuf>) -> InputArgs {
        InputArgs {
            input: input.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            inputs_file,
        }
    }

    #[test]
    fn test_values_are_typed_by_declaration() {
        let dir = tempfile::tempdir().unwrap();
        let doc = document(dir.path());

        let provided = collect_inputs(&doc, &args(&[("ocr_text", "42"), ("pages", "3")], None)).unwrap();
        assert_eq!(provided.get("ocr_text"), Some(&json!("42")));
        assert_eq!(provided.get("pages"), Some(&json!(3)));
    }

    #[test]
    fn test_command_line_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let doc = document(dir.path());
        let file = write_file(dir.path(), "inputs.json", r#"{"ocr_text": "from file", "pages": 2}"#);

        let provided = collect_inputs(&doc, &args(&[("pages", "5")], Some(file))).unwrap();
        assert_eq!(provided.get("ocr_text"), Some(&json!("from file")));
        assert_eq!(provided.get("pages"), Some(&json!(5)));
    }

    #[test]
    fn test_unparseable_and_undeclared_values() {
        let dir = tempfile::tempdir().unwrap();
        let doc = document(dir.path());

        let err = collect_inputs(&doc, &args(&[("pages", "many")], None)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input 'pages': expected int, found 'many'");

        let err = collect_inputs(&doc, &args(&[("title", "x")], None)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { ref key, .. } if key == "title"));
    }

    #[test]
    fn test_configured_strictness() {
        let mut config = Config::default();
        assert_eq!(validation_config(false, &config).mode, ValidationMode::Standard);
        assert_eq!(validation_config(true, &config).mode, ValidationMode::Strict);

        config.strict = true;
        assert_eq!(validation_config(false, &config).mode, ValidationMode::Strict);
    }
}
