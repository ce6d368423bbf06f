//! Provider request building
//!
//! Maps a validated document and its rendered prompt onto the request body a
//! provider's API expects. Dispatch is by the closed [`Provider`] enum; a
//! provider name outside it is an error, never a fallback.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

mod anthropic;
mod openai;

use crate::types::PromptDocument;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub use anthropic::AnthropicAdapter;
pub use openai::{GroqAdapter, OpenAiAdapter};

/// Supported providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Groq,
    Anthropic,
}

impl Provider {
    /// Canonical provider names
    pub const NAMES: [&'static str; 3] = ["openai", "groq", "anthropic"];

    /// Canonical name of this provider
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Groq => "groq",
            Provider::Anthropic => "anthropic",
        }
    }

    /// The adapter that builds requests for this provider
    pub fn adapter(&self) -> &'static dyn ProviderAdapter {
        match self {
            Provider::OpenAi => &OpenAiAdapter,
            Provider::Groq => &GroqAdapter,
            Provider::Anthropic => &AnthropicAdapter,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = Error;

    /// Match a provider name case-insensitively
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "groq" => Ok(Provider::Groq),
            "anthropic" => Ok(Provider::Anthropic),
            _ => Err(Error::UnsupportedProvider {
                provider: s.to_string(),
            }),
        }
    }
}

/// System and user halves of a full prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptParts<'a> {
    pub system: &'a str,
    pub user: &'a str,
}

impl<'a> PromptParts<'a> {
    /// Split a full prompt at the document's system prompt.
    ///
    /// If the full prompt does not start with the system prompt, all of it is
    /// treated as user content.
    pub fn split(doc: &PromptDocument, full_prompt: &'a str) -> Self {
        match full_prompt.strip_prefix(doc.system_prompt.as_str()) {
            Some(user) if !doc.system_prompt.is_empty() => Self {
                system: &full_prompt[..doc.system_prompt.len()],
                user,
            },
            _ => Self {
                system: "",
                user: full_prompt,
            },
        }
    }
}

/// Builds the provider-specific request body
pub trait ProviderAdapter: Send + Sync {
    /// API path the body is sent to
    fn endpoint(&self) -> &'static str;

    /// Build the request body
    fn build_body(&self, doc: &PromptDocument, parts: PromptParts<'_>) -> Value;
}

/// A request ready to hand to an HTTP client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestPayload {
    /// Target provider
    pub provider: Provider,

    /// API path relative to the provider's base URL
    pub endpoint: String,

    /// JSON request body
    pub body: Value,
}

impl RequestPayload {
    /// Serialize the body as pretty JSON
    pub fn body_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.body)?)
    }
}

/// Build the provider request for a rendered prompt
pub fn build_request(doc: &PromptDocument, full_prompt: &str) -> Result<RequestPayload> {
    let provider: Provider = doc.model.provider.parse()?;
    let adapter = provider.adapter();
    let parts = PromptParts::split(doc, full_prompt);

    debug!(
        provider = %provider,
        model = %doc.model.name,
        endpoint = adapter.endpoint(),
        "Building provider request"
    );

    Ok(RequestPayload {
        provider,
        endpoint: adapter.endpoint().to_string(),
        body: adapter.build_body(doc, parts),
    })
}
