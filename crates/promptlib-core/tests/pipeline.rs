//! End-to-end tests: resolve, render and build a provider request

use pretty_assertions::assert_eq;
use promptlib_core::{
    build_request, extract, render_with_inputs, resolve, DocumentVersion, Error, InputFieldSpec,
    InputType, ModelConfig, OutputSpec, PromptDocument, Provider, Status,
};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

fn autorename(provider: &str) -> PromptDocument {
    let mut inputs = BTreeMap::new();
    inputs.insert(
        "ocr_text".to_string(),
        InputFieldSpec::required(InputType::String),
    );
    inputs.insert(
        "original_filename".to_string(),
        InputFieldSpec::optional(InputType::String, json!("unknown")),
    );

    PromptDocument {
        prompt_id: "driveflow_autorename".to_string(),
        version: DocumentVersion::new(1, 2, 0),
        status: Status::Prod,
        owner: "platform-team".to_string(),
        description: Some("Suggest a filename for a scanned document".to_string()),
        tags: Some(vec!["files".to_string()]),
        created_at: None,
        updated_at: None,
        model: ModelConfig {
            provider: provider.to_string(),
            name: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            max_tokens: 120,
        },
        inputs,
        output: OutputSpec {
            format: "filename".to_string(),
            rules: Some(vec!["Keep the original extension".to_string()]),
            schema: None,
            constraints: None,
            example: None,
        },
        system_prompt: "You rename scanned documents.\n".to_string(),
        user_prompt_template: "OCR_TEXT:\n{{ocr_text}}\nORIGINAL:{{ original_filename }}"
            .to_string(),
        functions: None,
        examples: None,
        metadata: None,
    }
}

fn inputs(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

#[test]
fn test_openai_request_from_document() {
    let doc = autorename("openai");
    let prompt = render_with_inputs(&doc, &inputs(json!({"ocr_text": "Invoice ACME"}))).unwrap();
    assert_eq!(
        prompt,
        "You rename scanned documents.\nOCR_TEXT:\nInvoice ACME\nORIGINAL:unknown"
    );

    let payload = build_request(&doc, &prompt).unwrap();
    assert_eq!(payload.provider, Provider::OpenAi);
    assert_eq!(payload.endpoint, "/v1/chat/completions");
    assert_eq!(
        payload.body["messages"],
        json!([
            {"role": "system", "content": "You rename scanned documents.\n"},
            {"role": "user", "content": "OCR_TEXT:\nInvoice ACME\nORIGINAL:unknown"}
        ])
    );
}

#[test]
fn test_groq_request_uses_its_endpoint() {
    let doc = autorename("Groq");
    let prompt = render_with_inputs(&doc, &inputs(json!({"ocr_text": "x"}))).unwrap();
    let payload = build_request(&doc, &prompt).unwrap();

    assert_eq!(payload.provider, Provider::Groq);
    assert_eq!(payload.endpoint, "/openai/v1/chat/completions");
    assert_eq!(payload.body["max_completion_tokens"], json!(120));
}

#[test]
fn test_anthropic_request_separates_system() {
    let doc = autorename("anthropic");
    let prompt = render_with_inputs(&doc, &inputs(json!({"ocr_text": "x"}))).unwrap();
    let payload = build_request(&doc, &prompt).unwrap();

    assert_eq!(payload.endpoint, "/v1/messages");
    assert_eq!(payload.body["system"], json!("You rename scanned documents.\n"));
    assert_eq!(payload.body["messages"][0]["role"], json!("user"));
}

#[test]
fn test_unknown_provider_fails_after_rendering() {
    let doc = autorename("unknown");
    let prompt = render_with_inputs(&doc, &inputs(json!({"ocr_text": "x"}))).unwrap();
    let err = build_request(&doc, &prompt).unwrap_err();
    assert!(matches!(err, Error::UnsupportedProvider { .. }));
}

#[test]
fn test_missing_input_stops_pipeline() {
    let doc = autorename("openai");
    let err = resolve(&doc, &Map::new()).unwrap_err();
    assert_eq!(err.to_string(), "Required input(s) missing: ocr_text");
}

#[test]
fn test_metadata_matches_document() {
    let doc = autorename("openai");
    let metadata = extract(&doc);
    assert_eq!(metadata.prompt_id, doc.prompt_id);
    assert_eq!(metadata.version.to_string(), "1.2.0");
    assert_eq!(metadata.tags, doc.tags);
}

#[test]
fn test_documents_are_shareable_across_threads() {
    let doc = std::sync::Arc::new(autorename("openai"));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let doc = doc.clone();
            std::thread::spawn(move || {
                let provided = inputs(json!({"ocr_text": format!("page {}", i)}));
                render_with_inputs(&doc, &provided).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let rendered = handle.join().unwrap();
        assert!(rendered.contains(&format!("page {}", i)));
    }
}
