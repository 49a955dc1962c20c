//! Gemini Provider - Implementation of GenerativeProvider for the
//! Generative Language API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key)
//!     .with_model("gemini-3-flash-preview")
//!     .with_base_url("https://generativelanguage.googleapis.com");
//!
//! let provider = GeminiProvider::new(config);
//! ```
//!
//! Structured requests set `generationConfig.responseMimeType` to
//! `application/json` and forward the response schema, so the service
//! returns a bare JSON array literal in the candidate text.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    GenerationRequest, GenerationResponse, GenerativeError, GenerativeProvider, ProviderInfo,
    ResponseSchema,
};

/// Default model for every request kind.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use when the request does not name one.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Transport-level request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gemini API provider implementation.
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the generateContent endpoint URL for a model.
    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, model
        )
    }

    /// Converts our request to the service wire format.
    fn to_wire_request(&self, request: &GenerationRequest) -> WireRequest {
        let config = request.config.as_ref();

        let system_instruction = config
            .and_then(|c| c.system_instruction.as_ref())
            .map(|text| WireContent {
                role: None,
                parts: vec![WirePart { text: text.clone() }],
            });

        let generation_config =
            config
                .and_then(|c| c.response_schema.as_ref())
                .map(|schema| WireGenerationConfig {
                    response_mime_type: "application/json".to_string(),
                    response_schema: schema.clone(),
                });

        WireRequest {
            contents: vec![WireContent {
                role: Some("user".to_string()),
                parts: vec![WirePart {
                    text: request.contents.clone(),
                }],
            }],
            system_instruction,
            generation_config,
        }
    }

    /// Sends a request and maps transport failures.
    async fn send_request(&self, request: &GenerationRequest) -> Result<Response, GenerativeError> {
        let model = if request.model.is_empty() {
            &self.config.model
        } else {
            &request.model
        };
        let wire_request = self.to_wire_request(request);

        self.client
            .post(self.generate_url(model))
            .header("x-goog-api-key", self.config.api_key())
            .header("Content-Type", "application/json")
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerativeError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    GenerativeError::network(format!("Connection failed: {}", e))
                } else {
                    GenerativeError::network(e.to_string())
                }
            })
    }

    /// Maps non-success status codes to typed errors.
    async fn handle_response_status(
        &self,
        response: Response,
    ) -> Result<Response, GenerativeError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(GenerativeError::AuthenticationFailed),
            429 => Err(GenerativeError::rate_limited(60)),
            400 => Err(GenerativeError::InvalidRequest(error_body)),
            500..=599 => Err(GenerativeError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(GenerativeError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Extracts the first candidate's text from the response body.
    fn extract_text(body: WireResponse) -> Result<String, GenerativeError> {
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();
        Ok(text)
    }
}

#[async_trait]
impl GenerativeProvider for GeminiProvider {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerativeError> {
        let response = self.send_request(&request).await?;
        let response = self.handle_response_status(response).await?;

        let body: WireResponse = response
            .json()
            .await
            .map_err(|e| GenerativeError::parse(e.to_string()))?;

        let text = Self::extract_text(body)?;
        Ok(GenerationResponse::new(text))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("gemini", self.config.model.clone())
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<WireGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WirePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    response_mime_type: String,
    response_schema: ResponseSchema,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Debug, Deserialize)]
struct WireCandidate {
    content: Option<WireContent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ResponseSchema;

    fn provider() -> GeminiProvider {
        GeminiProvider::new(GeminiConfig::new("test-key"))
    }

    #[test]
    fn generate_url_includes_model() {
        let provider = provider();
        assert_eq!(
            provider.generate_url("gemini-3-flash-preview"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn wire_request_carries_system_instruction() {
        let provider = provider();
        let request = GenerationRequest::new(DEFAULT_MODEL, "Hello")
            .with_system_instruction("You are an ESG copilot.");

        let wire = provider.to_wire_request(&request);
        let json = serde_json::to_value(&wire).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Hello");
        assert_eq!(
            json["systemInstruction"]["parts"][0]["text"],
            "You are an ESG copilot."
        );
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn wire_request_carries_response_schema() {
        let provider = provider();
        let schema = ResponseSchema::array(ResponseSchema::object(vec![(
            "title",
            ResponseSchema::string(),
        )]));
        let request = GenerationRequest::new(DEFAULT_MODEL, "Plan").with_response_schema(schema);

        let wire = provider.to_wire_request(&request);
        let json = serde_json::to_value(&wire).unwrap();

        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(json["generationConfig"]["responseSchema"]["type"], "ARRAY");
    }

    #[test]
    fn extract_text_joins_parts() {
        let body: WireResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hello "}, {"text": "there"}]}
            }]
        }))
        .unwrap();
        assert_eq!(GeminiProvider::extract_text(body).unwrap(), "Hello there");
    }

    #[test]
    fn extract_text_tolerates_empty_candidates() {
        let body: WireResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(GeminiProvider::extract_text(body).unwrap(), "");
    }

    #[test]
    fn config_defaults_are_sensible() {
        let config = GeminiConfig::new("k");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.base_url.contains("generativelanguage"));
        assert_eq!(config.timeout, Duration::from_secs(60));
    }
}
