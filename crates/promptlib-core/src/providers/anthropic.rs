//! Anthropic messages API bodies

use super::{PromptParts, ProviderAdapter};
use crate::types::PromptDocument;
use serde_json::{json, Map, Value};

/// Anthropic messages
#[derive(Debug, Clone, Copy, Default)]
pub struct AnthropicAdapter;

impl ProviderAdapter for AnthropicAdapter {
    fn endpoint(&self) -> &'static str {
        "/v1/messages"
    }

    fn build_body(&self, doc: &PromptDocument, parts: PromptParts<'_>) -> Value {
        let mut body = Map::new();
        body.insert("model".to_string(), json!(doc.model.name));
        body.insert("max_tokens".to_string(), json!(doc.model.max_tokens));
        body.insert("temperature".to_string(), json!(doc.model.temperature));

        // System text is a top-level field, not a message
        if !parts.system.is_empty() {
            body.insert("system".to_string(), json!(parts.system));
        }

        body.insert(
            "messages".to_string(),
            json!([{"role": "user", "content": parts.user}]),
        );

        Value::Object(body)
    }
}
