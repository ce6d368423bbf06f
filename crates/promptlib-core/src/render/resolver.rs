//! Input resolution
//!
//! Merges caller-supplied values with the defaults a document declares.
//! Missing required inputs are accumulated and reported together.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::types::{value_kind, PromptDocument};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Fully resolved input values for one render call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedInputs {
    values: BTreeMap<String, Value>,
}

impl ResolvedInputs {
    /// Get a resolved value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Check whether a key was resolved
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of resolved values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing was resolved
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over resolved values in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Consume into the underlying map
    pub fn into_inner(self) -> BTreeMap<String, Value> {
        self.values
    }
}

impl FromIterator<(String, Value)> for ResolvedInputs {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Resolve the inputs of `doc` against caller-supplied values.
///
/// An explicit `null` counts as not supplied. When both missing and mistyped
/// inputs exist, the missing ones are reported.
pub fn resolve(doc: &PromptDocument, provided: &Map<String, Value>) -> Result<ResolvedInputs> {
    let mut values = BTreeMap::new();
    let mut missing = Vec::new();
    let mut invalid = None;

    for (key, spec) in &doc.inputs {
        match provided.get(key).filter(|v| !v.is_null()) {
            Some(value) => {
                if !spec.input_type.matches(value) {
                    invalid.get_or_insert_with(|| Error::InvalidInputValue {
                        key: key.clone(),
                        expected: spec.input_type.to_string(),
                        actual: value_kind(value).to_string(),
                    });
                    continue;
                }
                values.insert(key.clone(), value.clone());
            }
            None if spec.required => missing.push(key.clone()),
            None => match spec.default.as_ref().filter(|d| !d.is_null()) {
                Some(default) => {
                    debug!(input = %key, "Using declared default");
                    values.insert(key.clone(), default.clone());
                }
                None => missing.push(key.clone()),
            },
        }
    }

    if !missing.is_empty() {
        return Err(Error::RequiredInputMissing { keys: missing });
    }
    if let Some(err) = invalid {
        return Err(err);
    }

    for key in provided.keys().filter(|k| !doc.inputs.contains_key(*k)) {
        debug!(input = %key, prompt = %doc.prompt_id, "Ignoring undeclared input");
    }

    Ok(ResolvedInputs { values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::document_with_inputs;
    use crate::types::{InputFieldSpec, InputType};
    use serde_json::json;

    fn provided(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn a_required_b_optional() -> PromptDocument {
        document_with_inputs([
            ("a", InputFieldSpec::required(InputType::String)),
            ("b", InputFieldSpec::optional(InputType::String, json!("X"))),
        ])
    }

    #[test]
    fn test_defaults_fill_absent_optional_inputs() {
        let doc = a_required_b_optional();
        let resolved = resolve(&doc, &provided(json!({"a": "1"}))).unwrap();
        assert_eq!(resolved.get("a"), Some(&json!("1")));
        assert_eq!(resolved.get("b"), Some(&json!("X")));
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn test_caller_value_overrides_default() {
        let doc = a_required_b_optional();
        let resolved = resolve(&doc, &provided(json!({"a": "1", "b": "Y"}))).unwrap();
        assert_eq!(resolved.get("b"), Some(&json!("Y")));
    }

    #[test]
    fn test_missing_required_input() {
        let doc = a_required_b_optional();
        let err = resolve(&doc, &Map::new()).unwrap_err();
        match err {
            Error::RequiredInputMissing { keys } => assert_eq!(keys, vec!["a".to_string()]),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_all_missing_required_inputs_are_reported() {
        let doc = document_with_inputs([
            ("zeta", InputFieldSpec::required(InputType::String)),
            ("alpha", InputFieldSpec::required(InputType::Int)),
            ("mid", InputFieldSpec::optional(InputType::Bool, json!(true))),
        ]);
        let err = resolve(&doc, &provided(json!({"mid": false}))).unwrap_err();
        assert_eq!(err.input_keys(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_null_counts_as_absent() {
        let doc = a_required_b_optional();
        let err = resolve(&doc, &provided(json!({"a": null}))).unwrap_err();
        assert!(matches!(err, Error::RequiredInputMissing { .. }));

        let resolved = resolve(&doc, &provided(json!({"a": "1", "b": null}))).unwrap();
        assert_eq!(resolved.get("b"), Some(&json!("X")));
    }

    #[test]
    fn test_undeclared_inputs_are_ignored() {
        let doc = a_required_b_optional();
        let resolved = resolve(&doc, &provided(json!({"a": "1", "extra": 5}))).unwrap();
        assert!(!resolved.contains("extra"));
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn test_mistyped_input_is_rejected() {
        let doc = document_with_inputs([("count", InputFieldSpec::required(InputType::Int))]);
        let err = resolve(&doc, &provided(json!({"count": "three"}))).unwrap_err();
        match err {
            Error::InvalidInputValue { key, expected, actual } => {
                assert_eq!(key, "count");
                assert_eq!(expected, "int");
                assert_eq!(actual, "string");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_reported_before_mistyped() {
        let doc = document_with_inputs([
            ("count", InputFieldSpec::required(InputType::Int)),
            ("name", InputFieldSpec::required(InputType::String)),
        ]);
        let err = resolve(&doc, &provided(json!({"count": "three"}))).unwrap_err();
        assert!(matches!(err, Error::RequiredInputMissing { .. }));
    }

    #[test]
    fn test_integer_accepted_for_float() {
        let doc = document_with_inputs([("ratio", InputFieldSpec::required(InputType::Float))]);
        let resolved = resolve(&doc, &provided(json!({"ratio": 2}))).unwrap();
        assert_eq!(resolved.get("ratio"), Some(&json!(2)));
    }
}
