//! Application layer - the store, the copilot orchestrator, and the pure
//! context builders between them.

pub mod context;
pub mod copilot;
pub mod inflight;
pub mod prompts;
pub mod store;

pub use context::{unfinished_topics, ChatContext, FocusedQuestion, SuggestionContext};
pub use copilot::{CopilotService, ExtractionOutcome};
pub use inflight::{InFlightTracker, RequestKind};
pub use store::{AssessmentStore, CategoryProgress, StoreEvent, StoreObserver};
