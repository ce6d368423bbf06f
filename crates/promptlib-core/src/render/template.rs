//! Placeholder templates
//!
//! A template is split once into literal and placeholder segments. A closed
//! `{{name}}` (inner spaces allowed) whose name has no braces or whitespace
//! is a placeholder; every other brace sequence is literal text.
//!
//! Backslashes directly before `{{` are escapes: each `\\` writes one `\`,
//! and a remaining single `\` makes the `{{` literal. So `\{{name}}` writes
//! `{{name}}` and `\\{{name}}` writes `\` followed by the value.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::resolver::ResolvedInputs;
use crate::{Error, Result};
use serde_json::Value;

/// One piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied to the output unchanged
    Literal(String),
    /// A named placeholder
    Placeholder(String),
}

/// A parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse template source. Parsing never fails.
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(idx) = rest.find("{{") {
            let before = &rest[..idx];
            let text = before.trim_end_matches('\\');
            let backslashes = before.len() - text.len();
            literal.push_str(text);
            literal.extend(std::iter::repeat('\\').take(backslashes / 2));

            if backslashes % 2 == 1 {
                literal.push_str("{{");
                rest = &rest[idx + 2..];
                continue;
            }

            let after = &rest[idx + 2..];
            match after.find("}}").map(|end| (end, after[..end].trim())) {
                Some((end, name)) if is_placeholder_body(name) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(name.to_string()));
                    rest = &after[end + 2..];
                }
                _ => {
                    // Not a placeholder; keep one brace and rescan from the next
                    literal.push('{');
                    rest = &rest[idx + 1..];
                }
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    /// Parsed segments in source order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder names in source order (duplicates included)
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute resolved values into the template.
    ///
    /// Fails on the first placeholder with no resolved value.
    pub fn render(&self, resolved: &ResolvedInputs) -> Result<String> {
        let mut output = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Placeholder(name) => {
                    let value = resolved
                        .get(name)
                        .ok_or_else(|| Error::UndeclaredTemplateVariable { name: name.clone() })?;
                    push_value(&mut output, value);
                }
            }
        }
        Ok(output)
    }
}

/// Whether `name` is a valid input name: `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_placeholder_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Whether a trimmed `{{ ... }}` body is treated as a placeholder.
///
/// Wider than [`is_placeholder_name`] so that a malformed name fails at
/// render time instead of being copied through.
fn is_placeholder_body(body: &str) -> bool {
    !body.is_empty() && !body.contains(|c: char| c == '{' || c == '}' || c.is_whitespace())
}

fn push_value(output: &mut String, value: &Value) {
    match value {
        Value::String(s) => output.push_str(s),
        Value::Number(n) => output.push_str(&n.to_string()),
        Value::Bool(b) => output.push_str(if *b { "true" } else { "false" }),
        other => output.push_str(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    fn inputs(pairs: &[(&str, Value)]) -> ResolvedInputs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_simple_substitution() {
        let template = Template::parse("Hello {{name}}!");
        let rendered = template.render(&inputs(&[("name", json!("Sam"))])).unwrap();
        assert_eq!(rendered, "Hello Sam!");
    }

    #[test]
    fn test_inner_spaces_allowed() {
        let template = Template::parse("{{ name }} and {{name}}");
        assert_eq!(template.placeholders().collect::<Vec<_>>(), vec!["name", "name"]);
        let rendered = template.render(&inputs(&[("name", json!("x"))])).unwrap();
        assert_eq!(rendered, "x and x");
    }

    #[test]
    fn test_undeclared_variable_fails() {
        let template = Template::parse("Value: {{missing}}");
        let err = template.render(&ResolvedInputs::default()).unwrap_err();
        match err {
            Error::UndeclaredTemplateVariable { name } => assert_eq!(name, "missing"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_single_braces_are_literal() {
        let source = r#"Return {"name": {{name}}} or {oops} {{ not a name }} {{unterminated"#;
        let template = Template::parse(source);
        assert_eq!(template.placeholders().collect::<Vec<_>>(), vec!["name"]);
        let rendered = template.render(&inputs(&[("name", json!("\"Sam\""))])).unwrap();
        assert_eq!(
            rendered,
            r#"Return {"name": "Sam"} or {oops} {{ not a name }} {{unterminated"#
        );
    }

    #[test]
    fn test_triple_braces_wrap_value() {
        let template = Template::parse("{{{x}}}");
        let rendered = template.render(&inputs(&[("x", json!(7))])).unwrap();
        assert_eq!(rendered, "{7}");
    }

    #[test]
    fn test_escaped_placeholder_is_literal() {
        let template = Template::parse(r"Write \{{name}} literally, then {{name}}");
        let rendered = template.render(&inputs(&[("name", json!("Sam"))])).unwrap();
        assert_eq!(rendered, "Write {{name}} literally, then Sam");
    }

    #[test]
    fn test_doubled_backslash_keeps_placeholder() {
        let template = Template::parse(r"Path: C:\\{{dir}}");
        assert_eq!(template.placeholders().collect::<Vec<_>>(), vec!["dir"]);
        let rendered = template.render(&inputs(&[("dir", json!("Users"))])).unwrap();
        assert_eq!(rendered, r"Path: C:\Users");
    }

    #[test]
    fn test_odd_backslashes_escape_braces() {
        let template = Template::parse(r"\\\{{dir}} and a\b {{dir}}");
        let rendered = template.render(&inputs(&[("dir", json!("Users"))])).unwrap();
        assert_eq!(rendered, r"\{{dir}} and a\b Users");
    }

    #[test]
    fn test_malformed_name_is_not_copied_through() {
        let template = Template::parse("Name: {{foo.bar}} {{file-name}}");
        assert_eq!(template.placeholders().collect::<Vec<_>>(), vec!["foo.bar", "file-name"]);

        let err = template.render(&ResolvedInputs::default()).unwrap_err();
        match err {
            Error::UndeclaredTemplateVariable { name } => assert_eq!(name, "foo.bar"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_body_is_literal() {
        let template = Template::parse("{{}} {{ }}");
        assert_eq!(template.placeholders().count(), 0);
        assert_eq!(template.render(&ResolvedInputs::default()).unwrap(), "{{}} {{ }}");
    }

    #[test]
    fn test_placeholder_names() {
        assert!(is_placeholder_name("ocr_text"));
        assert!(is_placeholder_name("_x1"));
        assert!(!is_placeholder_name("file-name"));
        assert!(!is_placeholder_name("1st"));
        assert!(!is_placeholder_name(""));
    }

    #[test]
    fn test_value_representations() {
        let template = Template::parse("{{s}}|{{i}}|{{f}}|{{b}}|{{a}}");
        let rendered = template
            .render(&inputs(&[
                ("s", json!("text")),
                ("i", json!(42)),
                ("f", json!(0.5)),
                ("b", json!(false)),
                ("a", json!([1, "two"])),
            ]))
            .unwrap();
        assert_eq!(rendered, r#"text|42|0.5|false|[1,"two"]"#);
    }

    #[test]
    fn test_multiline_template() {
        let template = Template::parse("OCR_TEXT:\n{{ocr_text}}\n\nORIGINAL_FILENAME:\n{{original_filename}}\n");
        let rendered = template
            .render(&inputs(&[
                ("ocr_text", json!("Invoice 42")),
                ("original_filename", json!("scan.pdf")),
            ]))
            .unwrap();
        assert_eq!(rendered, "OCR_TEXT:\nInvoice 42\n\nORIGINAL_FILENAME:\nscan.pdf\n");
    }

    #[test]
    fn test_segments() {
        let template = Template::parse("a{{b}}c");
        assert_eq!(
            template.segments(),
            &[
                Segment::Literal("a".to_string()),
                Segment::Placeholder("b".to_string()),
                Segment::Literal("c".to_string()),
            ]
        );
        assert!(Template::parse("").segments().is_empty());
    }

    proptest! {
        #[test]
        fn prop_text_without_double_braces_is_unchanged(text in "[^{\\\\]*(\\{[^{\\\\]+)*") {
            let template = Template::parse(&text);
            prop_assert_eq!(template.placeholders().count(), 0);
            prop_assert_eq!(template.render(&ResolvedInputs::default()).unwrap(), text);
        }
    }
}
