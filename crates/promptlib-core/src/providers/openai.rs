//! OpenAI-compatible chat completion bodies (OpenAI, Groq)

use super::{PromptParts, ProviderAdapter};
use crate::types::PromptDocument;
use serde_json::{json, Map, Value};

/// OpenAI chat completions
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiAdapter;

impl ProviderAdapter for OpenAiAdapter {
    fn endpoint(&self) -> &'static str {
        "/v1/chat/completions"
    }

    fn build_body(&self, doc: &PromptDocument, parts: PromptParts<'_>) -> Value {
        chat_completion_body(doc, parts, "max_tokens")
    }
}

/// Groq's OpenAI-compatible chat completions
#[derive(Debug, Clone, Copy, Default)]
pub struct GroqAdapter;

impl ProviderAdapter for GroqAdapter {
    fn endpoint(&self) -> &'static str {
        "/openai/v1/chat/completions"
    }

    fn build_body(&self, doc: &PromptDocument, parts: PromptParts<'_>) -> Value {
        chat_completion_body(doc, parts, "max_completion_tokens")
    }
}

fn chat_completion_body(doc: &PromptDocument, parts: PromptParts<'_>, token_key: &str) -> Value {
    let mut messages = Vec::with_capacity(2);
    if !parts.system.is_empty() {
        messages.push(json!({"role": "system", "content": parts.system}));
    }
    messages.push(json!({"role": "user", "content": parts.user}));

    let mut body = Map::new();
    body.insert("model".to_string(), json!(doc.model.name));
    body.insert("temperature".to_string(), json!(doc.model.temperature));
    body.insert(token_key.to_string(), json!(doc.model.max_tokens));
    body.insert("messages".to_string(), Value::Array(messages));

    if doc.output.is_json() {
        body.insert(
            "response_format".to_string(),
            json!({"type": "json_object"}),
        );
    }

    Value::Object(body)
}
