//! Document builders shared by unit tests

use crate::types::{
    DocumentVersion, InputFieldSpec, InputType, ModelConfig, OutputSpec, PromptDocument, Status,
};
use serde_json::json;
use std::collections::BTreeMap;

/// A minimal valid document declaring the given inputs
pub(crate) fn document_with_inputs<'a>(
    inputs: impl IntoIterator<Item = (&'a str, InputFieldSpec)>,
) -> PromptDocument {
    PromptDocument {
        prompt_id: "test_prompt".to_string(),
        version: DocumentVersion::new(1, 0, 0),
        status: Status::Draft,
        owner: "tests".to_string(),
        description: None,
        tags: None,
        created_at: None,
        updated_at: None,
        model: ModelConfig {
            provider: "openai".to_string(),
            name: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            max_tokens: 120,
        },
        inputs: inputs
            .into_iter()
            .map(|(key, spec)| (key.to_string(), spec))
            .collect::<BTreeMap<_, _>>(),
        output: OutputSpec {
            format: "text".to_string(),
            rules: Some(vec!["Answer briefly".to_string()]),
            schema: None,
            constraints: None,
            example: None,
        },
        system_prompt: "SYS".to_string(),
        user_prompt_template: String::new(),
        functions: None,
        examples: None,
        metadata: None,
    }
}

/// The file-renaming prompt used throughout the docs
pub(crate) fn sample_document() -> PromptDocument {
    let mut doc = document_with_inputs([
        ("ocr_text", InputFieldSpec::required(InputType::String)),
        (
            "original_filename",
            InputFieldSpec::optional(InputType::String, json!("unknown")),
        ),
    ]);
    doc.prompt_id = "driveflow_autorename".to_string();
    doc.status = Status::Prod;
    doc.owner = "platform-team".to_string();
    doc.tags = Some(vec!["files".to_string(), "rename".to_string()]);
    doc.output = OutputSpec {
        format: "filename".to_string(),
        rules: Some(vec![
            "Use lowercase words separated by underscores".to_string(),
            "Keep the original extension".to_string(),
        ]),
        schema: None,
        constraints: None,
        example: Some("invoice_acme_2024_03.pdf".to_string()),
    };
    doc.system_prompt = "You rename scanned documents. ".to_string();
    doc.user_prompt_template =
        "OCR_TEXT:\n{{ocr_text}}\n\nORIGINAL_FILENAME:\n{{original_filename}}\n".to_string();
    doc
}
