//! Copilot service - orchestration of the four AI request kinds.
//!
//! Each request kind is an async call that settles with a plain value:
//! failures are caught at this boundary and converted into the documented
//! fallback, never retried, and never surfaced as an error type. A missing
//! credential short-circuits before any network attempt.
//!
//! The service is stateless per call. Suppressing concurrent requests of
//! the same kind for the same target is the caller's job (see
//! [`super::inflight::InFlightTracker`]).

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use crate::config::AiConfig;
use crate::domain::actions::{ActionPlanItem, ActionStatus, Effort, Impact};
use crate::domain::company::CompanyProfile;
use crate::domain::evidence::EvidenceKind;
use crate::domain::foundation::ActionId;
use crate::ports::{GenerationRequest, GenerativeProvider, ResponseSchema};

use super::context::{ChatContext, SuggestionContext};
use super::prompts;

/// Chat fallback when no API key is configured.
pub const CHAT_MISSING_KEY_FALLBACK: &str = "I'm ready to help, but I need an API Key to \
     function. Please ensure the environment is configured.";

/// Chat fallback when the service call fails.
pub const CHAT_FAILURE_FALLBACK: &str = "I'm having trouble connecting to my knowledge base \
     right now. Please try again later.";

/// Chat placeholder when the service settles with empty text.
pub const CHAT_BLANK_RESPONSE: &str = "I processed that but couldn't generate a text response.";

/// Suggestion returned without a configured key.
pub const SUGGESTION_MOCK: &str = "1000 (Mock Suggestion)";

/// Extraction text returned without a configured key.
pub const EXTRACTION_MISSING_KEY: &str = "Mock extraction: API Key missing.";

/// Extraction text returned when the service call fails.
pub const EXTRACTION_FAILURE: &str = "Error extracting data from document.";

/// Extraction placeholder when the service settles with empty text.
pub const EXTRACTION_BLANK: &str = "Could not extract data.";

/// Result of the document-extraction simulation.
///
/// Shown transiently by the caller; persisting it into the evidence record
/// is an explicit, separate store operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionOutcome {
    /// Descriptive paragraph of plausible facts.
    pub text: String,
    /// Confidence in [0, 1]; zero on every fallback path.
    pub confidence: f64,
}

/// Schema constraining action-plan generation: an array of objects whose
/// `impact`/`effort`/`status` fields are closed enumerations.
static PLAN_SCHEMA: Lazy<ResponseSchema> = Lazy::new(|| {
    ResponseSchema::array(ResponseSchema::object(vec![
        ("title", ResponseSchema::string()),
        ("impact", ResponseSchema::string_enum(&["High", "Medium", "Low"])),
        ("effort", ResponseSchema::string_enum(&["Hard", "Medium", "Easy"])),
        (
            "status",
            ResponseSchema::string_enum(&["Planned", "In Progress", "Done"]),
        ),
    ]))
});

/// Draft plan item as returned by the service.
///
/// Deserialization through the domain enums is the validation step: any
/// value outside the closed enumerations fails the parse, and the whole
/// plan is discarded.
#[derive(Debug, Deserialize)]
struct PlanItemDraft {
    title: String,
    impact: Impact,
    effort: Effort,
    status: ActionStatus,
}

/// Orchestrates requests to the generative service.
pub struct CopilotService {
    provider: Arc<dyn GenerativeProvider>,
    ai: AiConfig,
}

impl CopilotService {
    /// Creates a new copilot over the given provider and configuration.
    pub fn new(provider: Arc<dyn GenerativeProvider>, ai: AiConfig) -> Self {
        Self { provider, ai }
    }

    fn request(&self, contents: impl Into<String>) -> GenerationRequest {
        GenerationRequest::new(self.ai.model.clone(), contents)
    }

    // ─────────────────────────────────────────────────────────────────────
    // 1. Open-ended chat
    // ─────────────────────────────────────────────────────────────────────

    /// Generates the copilot's reply to a user chat message.
    ///
    /// Callers only ever receive a string: an answer, or one of the
    /// documented fallback texts.
    pub async fn chat_response(&self, user_message: &str, context: &ChatContext) -> String {
        if !self.ai.has_credential() {
            return CHAT_MISSING_KEY_FALLBACK.to_string();
        }

        let request = self
            .request(user_message)
            .with_system_instruction(prompts::chat_system_prompt(context));

        match self.provider.generate(request).await {
            Ok(response) if response.text.trim().is_empty() => CHAT_BLANK_RESPONSE.to_string(),
            Ok(response) => response.text,
            Err(err) => {
                warn!(error = %err, "chat request failed");
                CHAT_FAILURE_FALLBACK.to_string()
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // 2. Value suggestion
    // ─────────────────────────────────────────────────────────────────────

    /// Proposes a single value for a question.
    ///
    /// An empty string means "no suggestion available"; the caller must not
    /// mutate the question in that case.
    pub async fn suggest_value(&self, context: &SuggestionContext) -> String {
        if !self.ai.has_credential() {
            return SUGGESTION_MOCK.to_string();
        }

        let request = self.request(prompts::suggestion_prompt(context));

        match self.provider.generate(request).await {
            Ok(response) => response.text.trim().to_string(),
            Err(err) => {
                warn!(error = %err, topic = %context.topic, "suggestion request failed");
                String::new()
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // 3. Document-extraction simulation
    // ─────────────────────────────────────────────────────────────────────

    /// Simulates extracting facts from an uploaded document.
    ///
    /// No file bytes are read; the service describes the data a document
    /// with this name and type would plausibly hold. Success confidence
    /// sits in a fixed realistic band, derived deterministically from the
    /// filename.
    pub async fn extract_document_facts(
        &self,
        filename: &str,
        kind: EvidenceKind,
    ) -> ExtractionOutcome {
        if !self.ai.has_credential() {
            return ExtractionOutcome {
                text: EXTRACTION_MISSING_KEY.to_string(),
                confidence: 0.0,
            };
        }

        let request = self.request(prompts::extraction_prompt(filename, kind));

        match self.provider.generate(request).await {
            Ok(response) => {
                let text = if response.text.trim().is_empty() {
                    EXTRACTION_BLANK.to_string()
                } else {
                    response.text
                };
                ExtractionOutcome {
                    text,
                    confidence: confidence_band(filename),
                }
            }
            Err(err) => {
                warn!(error = %err, filename, "extraction request failed");
                ExtractionOutcome {
                    text: EXTRACTION_FAILURE.to_string(),
                    confidence: 0.0,
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // 4. Structured action-plan generation
    // ─────────────────────────────────────────────────────────────────────

    /// Generates 3-5 remediation actions for the remaining gaps.
    ///
    /// The request constrains the response to the plan schema; anything the
    /// service returns outside the closed enumerations is rejected and the
    /// result is an empty list, never a partial one. Every returned item
    /// carries a freshly generated id. The caller merges the result with
    /// the existing board via `replace_actions(existing ++ generated)`.
    pub async fn generate_action_plan(
        &self,
        profile: &CompanyProfile,
        unfinished_topics: &[String],
    ) -> Vec<ActionPlanItem> {
        if !self.ai.has_credential() {
            return mock_plan();
        }

        let request = self
            .request(prompts::action_plan_prompt(profile, unfinished_topics))
            .with_response_schema(PLAN_SCHEMA.clone());

        match self.provider.generate(request).await {
            Ok(response) => parse_plan(&response.text),
            Err(err) => {
                warn!(error = %err, "action plan request failed");
                Vec::new()
            }
        }
    }
}

/// The two fixed mock items returned without a configured key.
fn mock_plan() -> Vec<ActionPlanItem> {
    vec![
        ActionPlanItem::new(
            ActionId::new("mock1").expect("mock id is non-empty"),
            "Conduct an Initial Energy Audit",
            Impact::High,
            Effort::Medium,
            ActionStatus::Planned,
        )
        .expect("mock action is valid"),
        ActionPlanItem::new(
            ActionId::new("mock2").expect("mock id is non-empty"),
            "Publish an Environmental Policy Statement",
            Impact::Medium,
            Effort::Easy,
            ActionStatus::Planned,
        )
        .expect("mock action is valid"),
    ]
}

/// Parses a structured plan response into domain items.
///
/// Any malformed payload yields an empty list.
fn parse_plan(text: &str) -> Vec<ActionPlanItem> {
    let json = extract_json(text);

    let drafts: Vec<PlanItemDraft> = match serde_json::from_str(json) {
        Ok(drafts) => drafts,
        Err(err) => {
            warn!(error = %err, "discarding malformed action plan response");
            return Vec::new();
        }
    };

    let mut items = Vec::with_capacity(drafts.len());
    for draft in drafts {
        match ActionPlanItem::new(
            ActionId::generate(),
            draft.title,
            draft.impact,
            draft.effort,
            draft.status,
        ) {
            Ok(item) => items.push(item),
            Err(err) => {
                warn!(error = %err, "discarding action plan with invalid item");
                return Vec::new();
            }
        }
    }
    items
}

/// Extracts the JSON payload from a response that may wrap it in a
/// markdown code block.
fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    for pattern in ["```json", "```"] {
        if let Some(start) = trimmed.find(pattern) {
            let body = &trimmed[start + pattern.len()..];
            if let Some(end) = body.find("```") {
                return body[..end].trim();
            }
        }
    }

    trimmed
}

/// Deterministic confidence in [0.85, 0.95) derived from the filename.
fn confidence_band(filename: &str) -> f64 {
    let sum: u32 = filename.bytes().map(u32::from).sum();
    0.85 + f64::from(sum % 100) / 1000.0
}
