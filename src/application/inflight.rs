//! In-flight request tracking for copilot callers.
//!
//! The copilot itself is stateless per call; suppressing duplicate requests
//! of the same kind for the same target entity is the caller's
//! responsibility. This tracker is the marker the caller uses for that.
//!
//! A request that never settles leaves its marker set: there is no timeout
//! here. Callers must pair every `begin` with a `finish` once the call
//! settles, and must not let navigation leak a pending marker.

use std::collections::HashSet;
use std::sync::Mutex;

/// The four copilot request kinds, each independently loading-gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Chat,
    Suggestion,
    Extraction,
    PlanGeneration,
}

/// Per-(kind, target) in-flight markers.
///
/// Targets are entity ids; kind-level gates (chat, plan generation) use an
/// empty target.
#[derive(Debug, Default)]
pub struct InFlightTracker {
    inflight: Mutex<HashSet<(RequestKind, String)>>,
}

impl InFlightTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a request as in flight.
    ///
    /// Returns false if an identical request is already outstanding, in
    /// which case the caller must not issue another one.
    pub fn begin(&self, kind: RequestKind, target: &str) -> bool {
        self.inflight
            .lock()
            .expect("InFlightTracker: lock poisoned")
            .insert((kind, target.to_string()))
    }

    /// Clears the marker once the request settles.
    pub fn finish(&self, kind: RequestKind, target: &str) {
        self.inflight
            .lock()
            .expect("InFlightTracker: lock poisoned")
            .remove(&(kind, target.to_string()));
    }

    /// Returns true if an identical request is outstanding.
    pub fn is_in_flight(&self, kind: RequestKind, target: &str) -> bool {
        self.inflight
            .lock()
            .expect("InFlightTracker: lock poisoned")
            .contains(&(kind, target.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_marks_and_suppresses_duplicates() {
        let tracker = InFlightTracker::new();

        assert!(tracker.begin(RequestKind::Suggestion, "E1"));
        assert!(!tracker.begin(RequestKind::Suggestion, "E1"));
        assert!(tracker.is_in_flight(RequestKind::Suggestion, "E1"));
    }

    #[test]
    fn kinds_and_targets_are_independent() {
        let tracker = InFlightTracker::new();

        assert!(tracker.begin(RequestKind::Suggestion, "E1"));
        assert!(tracker.begin(RequestKind::Extraction, "E1"));
        assert!(tracker.begin(RequestKind::Suggestion, "E2"));
    }

    #[test]
    fn finish_clears_the_marker() {
        let tracker = InFlightTracker::new();

        tracker.begin(RequestKind::Chat, "");
        tracker.finish(RequestKind::Chat, "");

        assert!(!tracker.is_in_flight(RequestKind::Chat, ""));
        assert!(tracker.begin(RequestKind::Chat, ""));
    }

    #[test]
    fn unsettled_requests_keep_their_marker() {
        let tracker = InFlightTracker::new();
        tracker.begin(RequestKind::PlanGeneration, "");
        // No finish: the flag stays set indefinitely, by contract.
        assert!(tracker.is_in_flight(RequestKind::PlanGeneration, ""));
    }
}
