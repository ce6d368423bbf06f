//! Tracking metadata for prompt documents
//!
//! A small read-only projection of a document suitable for attaching to log
//! records or usage tracking.

use crate::types::{DocumentVersion, PromptDocument, Status};
use serde::Serialize;

/// Identifying fields of a prompt document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub prompt_id: String,
    pub version: DocumentVersion,
    pub status: Status,
    pub owner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub provider: String,
    pub model: String,
}

impl From<&PromptDocument> for Metadata {
    fn from(doc: &PromptDocument) -> Self {
        Self {
            prompt_id: doc.prompt_id.clone(),
            version: doc.version,
            status: doc.status,
            owner: doc.owner.clone(),
            tags: doc.tags.clone(),
            provider: doc.model.provider.clone(),
            model: doc.model.name.clone(),
        }
    }
}

/// Extract tracking metadata from a document
pub fn extract(doc: &PromptDocument) -> Metadata {
    Metadata::from(doc)
}
