//! Mock Generative Provider for testing.
//!
//! Provides a configurable mock implementation of the GenerativeProvider
//! port, allowing tests to run without calling the real service.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Simulated latency for concurrency tests
//! - Error injection for fallback testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockGenerativeProvider::new()
//!     .with_response("Hello, I'm the copilot!")
//!     .with_delay(Duration::from_millis(100));
//!
//! let response = provider.generate(request).await?;
//! assert_eq!(response.text, "Hello, I'm the copilot!");
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    GenerationRequest, GenerationResponse, GenerativeError, GenerativeProvider, ProviderInfo,
};

/// Mock generative provider for testing.
///
/// Configurable to return specific responses, simulate delays, or inject
/// errors.
#[derive(Debug, Clone)]
pub struct MockGenerativeProvider {
    /// Pre-configured outcomes (consumed in order).
    outcomes: Arc<Mutex<VecDeque<MockOutcome>>>,
    /// Provider info to return.
    info: ProviderInfo,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<GenerationRequest>>>,
}

/// A configured mock outcome.
#[derive(Debug, Clone)]
enum MockOutcome {
    /// Return a successful completion with this text.
    Text(String),
    /// Return an error.
    Error(GenerativeError),
}

impl Default for MockGenerativeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerativeProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            info: ProviderInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Text(text.into()));
        self
    }

    /// Adds an error outcome to the queue.
    pub fn with_error(self, error: GenerativeError) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(MockOutcome::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn recorded_calls(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Gets the next outcome or a default.
    fn next_outcome(&self) -> MockOutcome {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockOutcome::Text("Mock response".to_string()))
    }
}

#[async_trait]
impl GenerativeProvider for MockGenerativeProvider {
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, GenerativeError> {
        self.calls.lock().unwrap().push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_outcome() {
            MockOutcome::Text(text) => Ok(GenerationResponse::new(text)),
            MockOutcome::Error(err) => Err(err),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest::new("mock-model-1", "Hello")
    }

    #[tokio::test]
    async fn returns_configured_response() {
        let provider = MockGenerativeProvider::new().with_response("Hello from mock!");

        let response = provider.generate(request()).await.unwrap();

        assert_eq!(response.text, "Hello from mock!");
    }

    #[tokio::test]
    async fn returns_responses_in_order() {
        let provider = MockGenerativeProvider::new()
            .with_response("First")
            .with_response("Second");

        assert_eq!(provider.generate(request()).await.unwrap().text, "First");
        assert_eq!(provider.generate(request()).await.unwrap().text, "Second");
    }

    #[tokio::test]
    async fn returns_default_after_exhausted() {
        let provider = MockGenerativeProvider::new().with_response("Only one");

        provider.generate(request()).await.unwrap();
        let second = provider.generate(request()).await.unwrap();

        assert_eq!(second.text, "Mock response");
    }

    #[tokio::test]
    async fn returns_configured_error() {
        let provider =
            MockGenerativeProvider::new().with_error(GenerativeError::unavailable("down"));

        let result = provider.generate(request()).await;

        assert!(matches!(result, Err(GenerativeError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn tracks_calls() {
        let provider = MockGenerativeProvider::new();

        assert_eq!(provider.call_count(), 0);
        provider.generate(request()).await.unwrap();
        provider.generate(request()).await.unwrap();
        assert_eq!(provider.call_count(), 2);

        let calls = provider.recorded_calls();
        assert_eq!(calls[0].contents, "Hello");

        provider.clear_calls();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn respects_delay() {
        let provider = MockGenerativeProvider::new()
            .with_response("Delayed")
            .with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        provider.generate(request()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
