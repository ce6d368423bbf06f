//! Rendering of prompt documents into final prompt text
//!
//! The pipeline is: [`resolve`] caller inputs against the document's
//! declarations, then [`render`] the user template (or [`render_full`] for
//! the system prompt followed immediately by the rendered user template).
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod resolver;
pub mod template;

use crate::types::PromptDocument;
use crate::Result;
use serde_json::{Map, Value};
use tracing::debug;

pub use resolver::{resolve, ResolvedInputs};
pub use template::{is_placeholder_name, Segment, Template};

/// Renders documents against resolved inputs
pub trait Renderer {
    /// Render the user prompt template
    fn render(&self, doc: &PromptDocument, resolved: &ResolvedInputs) -> Result<String>;

    /// System prompt immediately followed by the rendered user template.
    ///
    /// No separator is inserted between the two.
    fn render_full(&self, doc: &PromptDocument, resolved: &ResolvedInputs) -> Result<String> {
        let user = self.render(doc, resolved)?;
        let mut full = String::with_capacity(doc.system_prompt.len() + user.len());
        full.push_str(&doc.system_prompt);
        full.push_str(&user);
        Ok(full)
    }
}

/// The default renderer. Holds no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptRenderer;

impl Renderer for PromptRenderer {
    fn render(&self, doc: &PromptDocument, resolved: &ResolvedInputs) -> Result<String> {
        let template = Template::parse(&doc.user_prompt_template);
        debug!(
            prompt = %doc.qualified_id(),
            placeholders = template.placeholders().count(),
            "Rendering user prompt template"
        );
        template.render(resolved)
    }
}

/// Render the user prompt template of `doc`
pub fn render(doc: &PromptDocument, resolved: &ResolvedInputs) -> Result<String> {
    PromptRenderer.render(doc, resolved)
}

/// Render the full prompt (system prompt + user template) of `doc`
pub fn render_full(doc: &PromptDocument, resolved: &ResolvedInputs) -> Result<String> {
    PromptRenderer.render_full(doc, resolved)
}

/// Resolve `provided` and render the full prompt in one step
pub fn render_with_inputs(doc: &PromptDocument, provided: &Map<String, Value>) -> Result<String> {
    let resolved = resolve(doc, provided)?;
    render_full(doc, &resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::document_with_inputs;
    use crate::types::{InputFieldSpec, InputType};
    use crate::Error;
    use serde_json::json;

    #[test]
    fn test_full_prompt_has_no_separator() {
        let mut doc = document_with_inputs([("x", InputFieldSpec::required(InputType::String))]);
        doc.system_prompt = "SYS. ".to_string();
        doc.user_prompt_template = "DATA:{{x}}".to_string();

        let provided = json!({"x": "42"}).as_object().cloned().unwrap();
        let resolved = resolve(&doc, &provided).unwrap();

        assert_eq!(render(&doc, &resolved).unwrap(), "DATA:42");
        assert_eq!(render_full(&doc, &resolved).unwrap(), "SYS. DATA:42");
        assert_eq!(render_with_inputs(&doc, &provided).unwrap(), "SYS. DATA:42");
    }

    #[test]
    fn test_render_fails_on_placeholder_outside_inputs() {
        let mut doc = document_with_inputs([("x", InputFieldSpec::required(InputType::String))]);
        doc.user_prompt_template = "{{x}} {{y}}".to_string();

        let provided = json!({"x": "1", "y": "2"}).as_object().cloned().unwrap();
        let err = render_with_inputs(&doc, &provided).unwrap_err();
        assert!(matches!(err, Error::UndeclaredTemplateVariable { ref name } if name == "y"));
    }

    #[test]
    fn test_renderer_serves_many_documents() {
        let renderer = PromptRenderer;
        let mut first = document_with_inputs([("a", InputFieldSpec::required(InputType::Int))]);
        first.user_prompt_template = "a={{a}}".to_string();
        let mut second = document_with_inputs([("b", InputFieldSpec::optional(InputType::Bool, json!(true)))]);
        second.user_prompt_template = "b={{b}}".to_string();

        let first_inputs = resolve(&first, json!({"a": 3}).as_object().unwrap()).unwrap();
        let second_inputs = resolve(&second, &Map::new()).unwrap();

        assert_eq!(renderer.render(&first, &first_inputs).unwrap(), "a=3");
        assert_eq!(renderer.render(&second, &second_inputs).unwrap(), "b=true");
        assert_eq!(renderer.render(&first, &first_inputs).unwrap(), "a=3");
    }
}
