//! Core types and data structures for prompt documents
//!
//! These are the typed forms of a validated document. The schema validator in
//! `promptlib-schemas` is the only producer of a [`PromptDocument`]; nothing in
//! this crate mutates one after it has been built.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt;

pub use crate::version::{DocumentVersion, VersionRange};

/// Model configuration of a prompt document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Provider identifier (e.g., "openai", "groq")
    pub provider: String,

    /// Model identifier (e.g., "gpt-4o-mini")
    pub name: String,

    /// Sampling temperature, 0.0 to 2.0
    pub temperature: f64,

    /// Upper bound on generated tokens
    pub max_tokens: u64,
}

/// Declared type of a document input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    String,
    Int,
    Float,
    Bool,
}

impl InputType {
    /// Wire names, in declaration order
    pub const NAMES: [&'static str; 4] = ["string", "int", "float", "bool"];

    /// Look up a type by its wire name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(InputType::String),
            "int" => Some(InputType::Int),
            "float" => Some(InputType::Float),
            "bool" => Some(InputType::Bool),
            _ => None,
        }
    }

    /// Wire name of this type
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::String => "string",
            InputType::Int => "int",
            InputType::Float => "float",
            InputType::Bool => "bool",
        }
    }

    /// Whether a JSON value is acceptable for this type.
    ///
    /// Integers are accepted where a float is declared.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            InputType::String => value.is_string(),
            InputType::Int => value.is_i64() || value.is_u64(),
            InputType::Float => value.is_number(),
            InputType::Bool => value.is_boolean(),
        }
    }

    /// Convert a textual value (e.g. from a `key=value` argument) into a typed value
    pub fn parse_str(&self, raw: &str) -> Option<Value> {
        match self {
            InputType::String => Some(Value::String(raw.to_string())),
            InputType::Int => {
                let trimmed = raw.trim();
                trimmed
                    .parse::<i64>()
                    .map(Value::from)
                    .or_else(|_| trimmed.parse::<u64>().map(Value::from))
                    .ok()
            }
            InputType::Float => raw
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number),
            InputType::Bool => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
        }
    }
}

impl fmt::Display for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration of one named input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputFieldSpec {
    /// Declared value type
    #[serde(rename = "type")]
    pub input_type: InputType,

    /// Whether callers must supply the value
    #[serde(default = "default_required")]
    pub required: bool,

    /// Value used when an optional input is not supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_required() -> bool {
    true
}

impl InputFieldSpec {
    /// A required input of the given type
    pub fn required(input_type: InputType) -> Self {
        Self {
            input_type,
            required: true,
            default: None,
            description: None,
        }
    }

    /// An optional input with a default value
    pub fn optional(input_type: InputType, default: Value) -> Self {
        Self {
            input_type,
            required: false,
            default: Some(default),
            description: None,
        }
    }
}

/// Output contract of a prompt document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSpec {
    /// Free-form format tag (e.g., "filename", "json", "text")
    pub format: String,

    /// Ordered instructions for the model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<String>>,

    /// JSON Schema the output must satisfy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    /// Named constraints on the output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Map<String, Value>>,

    /// Example output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl OutputSpec {
    /// Keys that count as an output specification besides `format`
    pub const SPECIFICATION_FIELDS: [&'static str; 4] = ["rules", "schema", "constraints", "example"];

    /// Whether at least one specification field is present
    pub fn has_specification(&self) -> bool {
        self.rules.is_some()
            || self.schema.is_some()
            || self.constraints.is_some()
            || self.example.is_some()
    }

    /// Whether the output is declared as JSON
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

/// Lifecycle status of a prompt document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Draft,
    Staging,
    Prod,
    Deprecated,
}

impl Status {
    /// Wire names, in lifecycle order
    pub const NAMES: [&'static str; 4] = ["draft", "staging", "prod", "deprecated"];

    /// Look up a status by its wire name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "draft" => Some(Status::Draft),
            "staging" => Some(Status::Staging),
            "prod" => Some(Status::Prod),
            "deprecated" => Some(Status::Deprecated),
            _ => None,
        }
    }

    /// Wire name of this status
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "draft",
            Status::Staging => "staging",
            Status::Prod => "prod",
            Status::Deprecated => "deprecated",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated prompt specification document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptDocument {
    pub prompt_id: String,

    pub version: DocumentVersion,

    pub status: Status,

    pub owner: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    pub model: ModelConfig,

    /// Declared inputs, ordered by key
    pub inputs: BTreeMap<String, InputFieldSpec>,

    pub output: OutputSpec,

    pub system_prompt: String,

    pub user_prompt_template: String,

    /// Function/tool declarations, passed through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<Value>,

    /// Few-shot examples, passed through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Value>,

    /// Free-form metadata, passed through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl PromptDocument {
    /// Required top-level keys of the wire format
    pub const REQUIRED_KEYS: [&'static str; 9] = [
        "prompt_id",
        "version",
        "status",
        "owner",
        "model",
        "inputs",
        "output",
        "system_prompt",
        "user_prompt_template",
    ];

    /// Optional top-level keys of the wire format
    pub const OPTIONAL_KEYS: [&'static str; 7] = [
        "description",
        "tags",
        "created_at",
        "updated_at",
        "functions",
        "examples",
        "metadata",
    ];

    /// Look up an input declaration
    pub fn input(&self, key: &str) -> Option<&InputFieldSpec> {
        self.inputs.get(key)
    }

    /// Keys of the inputs callers must supply
    pub fn required_inputs(&self) -> impl Iterator<Item = &str> {
        self.inputs
            .iter()
            .filter(|(_, spec)| spec.required)
            .map(|(key, _)| key.as_str())
    }

    /// `prompt_id@version`, used in logs and catalog listings
    pub fn qualified_id(&self) -> String {
        format!("{}@{}", self.prompt_id, self.version)
    }
}

/// Short name of a JSON value's kind, used in error messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_type_matches() {
        assert!(InputType::String.matches(&json!("x")));
        assert!(!InputType::String.matches(&json!(1)));
        assert!(InputType::Int.matches(&json!(-3)));
        assert!(!InputType::Int.matches(&json!(1.5)));
        assert!(InputType::Float.matches(&json!(1.5)));
        assert!(InputType::Float.matches(&json!(2)));
        assert!(InputType::Bool.matches(&json!(false)));
        assert!(!InputType::Bool.matches(&json!("false")));
    }

    #[test]
    fn test_input_type_parse_str() {
        assert_eq!(InputType::String.parse_str(" a b "), Some(json!(" a b ")));
        assert_eq!(InputType::Int.parse_str("42"), Some(json!(42)));
        assert_eq!(InputType::Int.parse_str("4.2"), None);
        assert_eq!(InputType::Float.parse_str("0.25"), Some(json!(0.25)));
        assert_eq!(InputType::Float.parse_str("NaN"), None);
        assert_eq!(InputType::Bool.parse_str("TRUE"), Some(json!(true)));
        assert_eq!(InputType::Bool.parse_str("yes"), None);
    }

    #[test]
    fn test_names_round_trip() {
        for name in InputType::NAMES {
            assert_eq!(InputType::from_name(name).unwrap().as_str(), name);
        }
        for name in Status::NAMES {
            assert_eq!(Status::from_name(name).unwrap().as_str(), name);
        }
        assert_eq!(Status::from_name("Prod"), None);
    }

    #[test]
    fn test_output_specification_presence() {
        let mut output = OutputSpec {
            format: "json".to_string(),
            rules: None,
            schema: None,
            constraints: None,
            example: None,
        };
        assert!(!output.has_specification());
        assert!(output.is_json());

        output.example = Some("{}".to_string());
        assert!(output.has_specification());
    }

    #[test]
    fn test_input_field_spec_defaults_required() {
        let spec: InputFieldSpec = serde_json::from_value(json!({"type": "int"})).unwrap();
        assert!(spec.required);
        assert_eq!(spec, InputFieldSpec::required(InputType::Int));
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(value_kind(&json!(1)), "integer");
        assert_eq!(value_kind(&json!(1.5)), "number");
        assert_eq!(value_kind(&json!(null)), "null");
        assert_eq!(value_kind(&json!({})), "object");
    }
}
