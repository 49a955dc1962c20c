//! Generative Provider Port - Interface for the external AI service.
//!
//! This port abstracts the single external dependency of the system: a
//! generative text service. The copilot orchestrator builds requests here
//! and never touches a concrete transport, so every request kind can be
//! tested against a scripted mock.
//!
//! # Design
//!
//! - One request shape covers all four request kinds: model id + content +
//!   optional system instruction or response schema
//! - Structured generation is expressed by attaching a [`ResponseSchema`];
//!   the provider is expected to return a JSON array literal in `text`
//! - Error types for common failure modes; callers above the orchestrator
//!   never see them, only documented fallback values

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for generative completions.
///
/// Implementations connect to an external service (or script responses in
/// tests) and translate between the provider API and this contract.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Generate a single completion for the given request.
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerativeError>;

    /// Provider information (name, default model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for a generative completion.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Model identifier (e.g., "gemini-3-flash-preview").
    pub model: String,
    /// Free text or a fully constructed prompt string.
    pub contents: String,
    /// Optional per-request configuration.
    pub config: Option<GenerationConfig>,
}

impl GenerationRequest {
    /// Creates a request for the given model and content.
    pub fn new(model: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            contents: contents.into(),
            config: None,
        }
    }

    /// Sets the system instruction.
    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.config
            .get_or_insert_with(GenerationConfig::default)
            .system_instruction = Some(instruction.into());
        self
    }

    /// Constrains the response to a schema (structured generation).
    pub fn with_response_schema(mut self, schema: ResponseSchema) -> Self {
        self.config
            .get_or_insert_with(GenerationConfig::default)
            .response_schema = Some(schema);
        self
    }

    /// Returns true if this is a structured (schema-constrained) request.
    pub fn is_structured(&self) -> bool {
        self.config
            .as_ref()
            .is_some_and(|c| c.response_schema.is_some())
    }
}

/// Per-request configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationConfig {
    /// System prompt guiding model behavior.
    pub system_instruction: Option<String>,
    /// Schema the response text must conform to (JSON array literal).
    pub response_schema: Option<ResponseSchema>,
}

/// Response from a generative completion.
///
/// For structured requests, `text` is expected to hold a JSON array literal
/// matching the requested schema; the orchestrator parses and validates it.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResponse {
    /// Generated text.
    pub text: String,
}

impl GenerationResponse {
    /// Creates a response wrapping the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// JSON-schema-like structure constraining a structured response.
///
/// Mirrors the subset of the service's schema language the system uses:
/// arrays of flat objects with string and enum-constrained string fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSchema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ResponseSchema>>,
    #[serde(skip_serializing_if = "std::collections::BTreeMap::is_empty", default)]
    pub properties: std::collections::BTreeMap<String, ResponseSchema>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub required: Vec<String>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty", default)]
    pub enum_values: Vec<String>,
}

/// Schema node types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaType {
    Array,
    Object,
    String,
    Number,
    Boolean,
}

impl ResponseSchema {
    /// An array whose items match the given schema.
    pub fn array(items: ResponseSchema) -> Self {
        Self {
            schema_type: SchemaType::Array,
            items: Some(Box::new(items)),
            properties: Default::default(),
            required: Vec::new(),
            enum_values: Vec::new(),
        }
    }

    /// An object with the given properties, all required.
    pub fn object(properties: Vec<(&str, ResponseSchema)>) -> Self {
        let required = properties.iter().map(|(k, _)| k.to_string()).collect();
        Self {
            schema_type: SchemaType::Object,
            items: None,
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            required,
            enum_values: Vec::new(),
        }
    }

    /// A free string field.
    pub fn string() -> Self {
        Self {
            schema_type: SchemaType::String,
            items: None,
            properties: Default::default(),
            required: Vec::new(),
            enum_values: Vec::new(),
        }
    }

    /// A string field constrained to a closed enumeration.
    pub fn string_enum(values: &[&str]) -> Self {
        Self {
            schema_type: SchemaType::String,
            items: None,
            properties: Default::default(),
            required: Vec::new(),
            enum_values: values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// Provider information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "gemini", "mock").
    pub name: String,
    /// Default model identifier.
    pub model: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Generative provider errors.
///
/// These never escape the copilot orchestrator; each request kind converts
/// them into its documented fallback value.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerativeError {
    /// No API key configured; detected before any network attempt.
    #[error("no credential configured")]
    MissingCredential,

    /// API key rejected by the service.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Rate limited by the service.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Service is unavailable.
    #[error("service unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out at the transport layer.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// Failed to parse the provider response envelope.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl GenerativeError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Returns true if retrying could help. Informational only: the
    /// orchestrator never retries, it falls back.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerativeError::RateLimited { .. }
                | GenerativeError::Unavailable { .. }
                | GenerativeError::Network(_)
                | GenerativeError::Timeout { .. }
        )
    }
}
