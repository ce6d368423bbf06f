//! Document parsing for YAML and JSON formats
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use promptlib_core::value_kind;
use serde_json::Value;
use std::path::Path;

/// Supported file formats for document parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
        }
    }

    /// Whether `path` has an extension this parser understands
    pub fn is_supported(path: &Path) -> bool {
        Self::from_path(path).is_ok()
    }
}

/// Document parser with support for multiple formats
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentParser;

impl DocumentParser {
    /// Create a new document parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a document file into a raw mapping, detecting format from extension
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let format = Format::from_path(path)?;

        let metadata = std::fs::metadata(path).map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;
        if !metadata.is_file() {
            return Err(LoaderError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

        self.parse_content(&content, format, path)
    }

    /// Parse document content with explicit format into a raw mapping
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        if content.trim().is_empty() {
            return Err(LoaderError::EmptyDocument {
                path: path.to_path_buf(),
            });
        }

        let value = match format {
            Format::Yaml => self.parse_yaml(content, path)?,
            Format::Json => self.parse_json(content, path)?,
        };

        if value.is_null() {
            return Err(LoaderError::EmptyDocument {
                path: path.to_path_buf(),
            });
        }
        if !value.is_object() {
            return Err(LoaderError::NotAMapping {
                path: path.to_path_buf(),
                found: value_kind(&value).to_string(),
            });
        }
        Ok(value)
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        // First parse as YAML Value to catch YAML-specific errors
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?;

        // Convert to JSON Value for consistent handling
        serde_json::to_value(yaml_value).map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        serde_json::from_str(content).map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_detection() {
        assert_eq!(Format::from_path(Path::new("a.yaml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.YML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.json")).unwrap(), Format::Json);
        assert!(Format::from_path(Path::new("a.toml")).is_err());
        assert!(Format::from_path(Path::new("README")).is_err());
    }

    #[test]
    fn test_yaml_becomes_json_value() {
        let parser = DocumentParser::new();
        let value = parser
            .parse_content(
                "prompt_id: x\nversion: 1.0.0\nmodel:\n  temperature: 0.2\n  max_tokens: 10\n",
                Format::Yaml,
                Path::new("x.yml"),
            )
            .unwrap();
        assert_eq!(value["version"], serde_json::json!("1.0.0"));
        assert_eq!(value["model"]["max_tokens"], serde_json::json!(10));
    }

    #[test]
    fn test_empty_and_non_mapping_documents() {
        let parser = DocumentParser::new();
        let path = Path::new("x.yml");
        assert!(matches!(
            parser.parse_content("  \n", Format::Yaml, path),
            Err(LoaderError::EmptyDocument { .. })
        ));
        assert!(matches!(
            parser.parse_content("~\n", Format::Yaml, path),
            Err(LoaderError::EmptyDocument { .. })
        ));
        match parser.parse_content("- a\n- b\n", Format::Yaml, path) {
            Err(LoaderError::NotAMapping { found, .. }) => assert_eq!(found, "array"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_syntax_errors() {
        let parser = DocumentParser::new();
        assert!(matches!(
            parser.parse_content("key: [unclosed", Format::Yaml, Path::new("x.yaml")),
            Err(LoaderError::YamlParseError { .. })
        ));
        assert!(matches!(
            parser.parse_content("{\"key\": ", Format::Json, Path::new("x.json")),
            Err(LoaderError::JsonParseError { .. })
        ));
    }

    #[test]
    fn test_parse_file_errors() {
        let parser = DocumentParser::new();
        assert!(matches!(
            parser.parse_file(Path::new("/nonexistent/prompt.yml")),
            Err(LoaderError::NotFound { .. })
        ));

        let dir = tempfile::Builder::new().suffix(".yml").tempdir().unwrap();
        assert!(matches!(
            parser.parse_file(dir.path()),
            Err(LoaderError::NotAFile { .. })
        ));
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{\"prompt_id\": \"x\"}}").unwrap();
        let value = DocumentParser::new().parse_file(file.path()).unwrap();
        assert_eq!(value["prompt_id"], "x");
    }
}
