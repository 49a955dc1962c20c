//! Assessment question entity.
//!
//! Questions are the unit of progress in the self-assessment. All mutation
//! goes through [`Question::apply`] and the completion toggle, which enforce
//! the status/value invariant: a question can only be `Completed` or
//! `Verified` while it holds a non-empty value.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, EvidenceId, QuestionId, Timestamp};

/// The three VSME assessment categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EsgCategory {
    Environment,
    Social,
    Governance,
}

impl EsgCategory {
    /// All categories in display order.
    pub const ALL: [EsgCategory; 3] = [
        EsgCategory::Environment,
        EsgCategory::Social,
        EsgCategory::Governance,
    ];
}

impl std::fmt::Display for EsgCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EsgCategory::Environment => "Environment",
            EsgCategory::Social => "Social",
            EsgCategory::Governance => "Governance",
        };
        write!(f, "{}", s)
    }
}

/// Progress status of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    NotStarted,
    InProgress,
    Completed,
    Verified,
}

impl QuestionStatus {
    /// Statuses that assert a recorded answer exists.
    pub fn requires_value(&self) -> bool {
        matches!(self, QuestionStatus::Completed | QuestionStatus::Verified)
    }

    /// Statuses that count as unfinished for plan generation.
    pub fn is_unfinished(&self) -> bool {
        matches!(self, QuestionStatus::NotStarted | QuestionStatus::InProgress)
    }
}

/// A recorded answer: numeric for metrics, prose for narrative questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
}

impl AnswerValue {
    /// Whitespace-only text counts as no answer at all.
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Number(_) => false,
            AnswerValue::Text(s) => s.trim().is_empty(),
        }
    }
}

impl std::fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerValue::Number(n) => write!(f, "{}", n),
            AnswerValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        AnswerValue::Number(n)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

/// Partial update applied to a question.
///
/// Fields left unset are untouched. `value` distinguishes "set" from
/// "clear"; blank text is normalized to a cleared value.
#[derive(Debug, Clone, Default)]
pub struct QuestionPatch {
    value: Option<Option<AnswerValue>>,
    status: Option<QuestionStatus>,
    ai_suggestion: Option<Option<String>>,
}

impl QuestionPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the answer value.
    pub fn with_value(mut self, value: impl Into<AnswerValue>) -> Self {
        self.value = Some(Some(value.into()));
        self
    }

    /// Clears the answer value.
    pub fn clear_value(mut self) -> Self {
        self.value = Some(None);
        self
    }

    /// Explicitly sets the status.
    pub fn with_status(mut self, status: QuestionStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Stores an AI-proposed value alongside the question.
    pub fn with_ai_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.ai_suggestion = Some(Some(suggestion.into()));
        self
    }

    /// Removes the stored AI suggestion.
    pub fn clear_ai_suggestion(mut self) -> Self {
        self.ai_suggestion = Some(None);
        self
    }

    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.status.is_none() && self.ai_suggestion.is_none()
    }
}

/// A single assessment question.
///
/// # Invariants
///
/// - `status ∈ {Completed, Verified}` implies a non-blank `value`
/// - `evidence_ids` contains no duplicates; the store keeps every entry
///   pointing at a live evidence document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    category: EsgCategory,
    topic: String,
    text: String,
    description: String,
    value: Option<AnswerValue>,
    unit: Option<String>,
    status: QuestionStatus,
    evidence_ids: Vec<EvidenceId>,
    last_updated: Option<Timestamp>,
    ai_suggestion: Option<String>,
}

impl Question {
    /// Creates a fresh, unanswered question.
    pub fn new(
        id: QuestionId,
        category: EsgCategory,
        topic: impl Into<String>,
        text: impl Into<String>,
        description: impl Into<String>,
        unit: Option<String>,
    ) -> Self {
        Self {
            id,
            category,
            topic: topic.into(),
            text: text.into(),
            description: description.into(),
            value: None,
            unit,
            status: QuestionStatus::NotStarted,
            evidence_ids: Vec::new(),
            last_updated: None,
            ai_suggestion: None,
        }
    }

    /// Reconstitutes a question in a known state (catalog seeds).
    ///
    /// Callers are responsible for supplying a state that satisfies the
    /// invariants; seeds are covered by tests.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: QuestionId,
        category: EsgCategory,
        topic: impl Into<String>,
        text: impl Into<String>,
        description: impl Into<String>,
        value: Option<AnswerValue>,
        unit: Option<String>,
        status: QuestionStatus,
        evidence_ids: Vec<EvidenceId>,
        last_updated: Option<Timestamp>,
    ) -> Self {
        Self {
            id,
            category,
            topic: topic.into(),
            text: text.into(),
            description: description.into(),
            value,
            unit,
            status,
            evidence_ids,
            last_updated,
            ai_suggestion: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn category(&self) -> EsgCategory {
        self.category
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value(&self) -> Option<&AnswerValue> {
        self.value.as_ref()
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn status(&self) -> QuestionStatus {
        self.status
    }

    pub fn evidence_ids(&self) -> &[EvidenceId] {
        &self.evidence_ids
    }

    pub fn last_updated(&self) -> Option<&Timestamp> {
        self.last_updated.as_ref()
    }

    pub fn ai_suggestion(&self) -> Option<&str> {
        self.ai_suggestion.as_deref()
    }

    /// Returns true if a non-blank value is recorded.
    pub fn has_value(&self) -> bool {
        self.value.as_ref().is_some_and(|v| !v.is_blank())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────────────

    /// Applies a partial update, enforcing the status/value invariant.
    ///
    /// Rules:
    /// - a value transition from blank to non-blank with no explicit status
    ///   auto-advances `NotStarted` answers to `InProgress`
    /// - a value transition to blank with no explicit status reverts the
    ///   question to `NotStarted`
    /// - an explicit `Completed` on an already-completed question reverts it
    ///   to `InProgress` (completion is a manual toggle)
    /// - an explicit `Completed` or `Verified` is rejected while the
    ///   resulting value is blank; the whole patch is then a no-op
    ///
    /// # Errors
    ///
    /// - `EmptyValueCompletion` when the explicit status requires a value
    ///   the patched question would not have
    pub fn apply(&mut self, patch: QuestionPatch) -> Result<(), DomainError> {
        let had_value = self.has_value();

        let next_value = match patch.value {
            Some(candidate) => candidate.filter(|v| !v.is_blank()),
            None => self.value.clone(),
        };
        let will_have_value = next_value.is_some();

        let next_status = match patch.status {
            Some(QuestionStatus::Completed) if self.status == QuestionStatus::Completed => {
                // Manual toggle: completing twice un-completes.
                QuestionStatus::InProgress
            }
            Some(requested) => {
                if requested.requires_value() && !will_have_value {
                    return Err(DomainError::empty_value_completion(&self.id));
                }
                requested
            }
            None => match (had_value, will_have_value) {
                (false, true) if self.status == QuestionStatus::NotStarted => {
                    QuestionStatus::InProgress
                }
                (true, false) => QuestionStatus::NotStarted,
                _ => self.status,
            },
        };

        self.value = next_value;
        self.status = next_status;
        if let Some(suggestion) = patch.ai_suggestion {
            self.ai_suggestion = suggestion;
        }
        self.last_updated = Some(Timestamp::now());

        debug_assert!(!self.status.requires_value() || self.has_value());
        Ok(())
    }

    /// Toggles manual completion.
    ///
    /// A completed question reverts to `InProgress`; an answered question
    /// advances to `Completed`.
    ///
    /// # Errors
    ///
    /// - `EmptyValueCompletion` when no value is recorded; the question is
    ///   left untouched
    pub fn toggle_completion(&mut self) -> Result<(), DomainError> {
        if self.status == QuestionStatus::Completed {
            self.status = QuestionStatus::InProgress;
        } else {
            if !self.has_value() {
                return Err(DomainError::empty_value_completion(&self.id));
            }
            self.status = QuestionStatus::Completed;
        }
        self.last_updated = Some(Timestamp::now());
        Ok(())
    }

    /// Links an evidence document, keeping `evidence_ids` duplicate-free.
    ///
    /// Returns true if the link was newly added.
    pub(crate) fn link_evidence(&mut self, evidence_id: EvidenceId) -> bool {
        if self.evidence_ids.contains(&evidence_id) {
            return false;
        }
        self.evidence_ids.push(evidence_id);
        true
    }

    /// Removes an evidence link if present (cascade on evidence deletion).
    ///
    /// Returns true if a link was removed.
    pub(crate) fn unlink_evidence(&mut self, evidence_id: &EvidenceId) -> bool {
        let before = self.evidence_ids.len();
        self.evidence_ids.retain(|id| id != evidence_id);
        self.evidence_ids.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question::new(
            QuestionId::new("E1").unwrap(),
            EsgCategory::Environment,
            "Energy",
            "Total Electricity Consumption",
            "Please enter the total electricity consumed during the reporting period.",
            Some("kWh".to_string()),
        )
    }

    mod status {
        use super::*;

        #[test]
        fn completed_and_verified_require_value() {
            assert!(QuestionStatus::Completed.requires_value());
            assert!(QuestionStatus::Verified.requires_value());
            assert!(!QuestionStatus::InProgress.requires_value());
        }

        #[test]
        fn unfinished_covers_not_started_and_in_progress() {
            assert!(QuestionStatus::NotStarted.is_unfinished());
            assert!(QuestionStatus::InProgress.is_unfinished());
            assert!(!QuestionStatus::Completed.is_unfinished());
            assert!(!QuestionStatus::Verified.is_unfinished());
        }

        #[test]
        fn serializes_snake_case() {
            let json = serde_json::to_string(&QuestionStatus::NotStarted).unwrap();
            assert_eq!(json, "\"not_started\"");
            let json = serde_json::to_string(&QuestionStatus::InProgress).unwrap();
            assert_eq!(json, "\"in_progress\"");
        }
    }

    mod answer_value {
        use super::*;

        #[test]
        fn numbers_are_never_blank() {
            assert!(!AnswerValue::Number(0.0).is_blank());
        }

        #[test]
        fn whitespace_text_is_blank() {
            assert!(AnswerValue::Text("   ".to_string()).is_blank());
            assert!(!AnswerValue::Text("Yes".to_string()).is_blank());
        }

        #[test]
        fn untagged_serde_matches_wire_shape() {
            assert_eq!(
                serde_json::to_string(&AnswerValue::Number(12500.0)).unwrap(),
                "12500.0"
            );
            assert_eq!(
                serde_json::to_string(&AnswerValue::from("Yes")).unwrap(),
                "\"Yes\""
            );
            let parsed: AnswerValue = serde_json::from_str("\"Yes\"").unwrap();
            assert_eq!(parsed, AnswerValue::from("Yes"));
        }
    }

    mod apply {
        use super::*;

        #[test]
        fn setting_value_auto_advances_to_in_progress() {
            let mut q = question();
            q.apply(QuestionPatch::new().with_value("1500")).unwrap();
            assert_eq!(q.status(), QuestionStatus::InProgress);
            assert!(q.has_value());
            assert!(q.last_updated().is_some());
        }

        #[test]
        fn clearing_value_reverts_to_not_started() {
            let mut q = question();
            q.apply(QuestionPatch::new().with_value(1500.0)).unwrap();
            q.apply(QuestionPatch::new().clear_value()).unwrap();
            assert_eq!(q.status(), QuestionStatus::NotStarted);
            assert!(!q.has_value());
        }

        #[test]
        fn blank_text_counts_as_cleared() {
            let mut q = question();
            q.apply(QuestionPatch::new().with_value("1500")).unwrap();
            q.apply(QuestionPatch::new().with_value("  ")).unwrap();
            assert_eq!(q.status(), QuestionStatus::NotStarted);
            assert!(!q.has_value());
        }

        #[test]
        fn explicit_status_wins_over_auto_advance() {
            let mut q = question();
            q.apply(
                QuestionPatch::new()
                    .with_value("42")
                    .with_status(QuestionStatus::Verified),
            )
            .unwrap();
            assert_eq!(q.status(), QuestionStatus::Verified);
        }

        #[test]
        fn completing_without_value_is_rejected_whole() {
            let mut q = question();
            let err = q
                .apply(QuestionPatch::new().with_status(QuestionStatus::Completed))
                .unwrap_err();
            assert_eq!(err.code, crate::domain::foundation::ErrorCode::EmptyValueCompletion);
            assert_eq!(q.status(), QuestionStatus::NotStarted);
            assert!(q.last_updated().is_none());
        }

        #[test]
        fn completing_while_clearing_value_is_rejected() {
            let mut q = question();
            q.apply(QuestionPatch::new().with_value("1500")).unwrap();
            let result = q.apply(
                QuestionPatch::new()
                    .clear_value()
                    .with_status(QuestionStatus::Completed),
            );
            assert!(result.is_err());
            assert!(q.has_value());
            assert_eq!(q.status(), QuestionStatus::InProgress);
        }

        #[test]
        fn explicit_completed_twice_reverts_to_in_progress() {
            let mut q = question();
            q.apply(QuestionPatch::new().with_value("1500")).unwrap();
            q.apply(QuestionPatch::new().with_status(QuestionStatus::Completed))
                .unwrap();
            assert_eq!(q.status(), QuestionStatus::Completed);
            q.apply(QuestionPatch::new().with_status(QuestionStatus::Completed))
                .unwrap();
            assert_eq!(q.status(), QuestionStatus::InProgress);
        }

        #[test]
        fn editing_value_keeps_completed_status() {
            let mut q = question();
            q.apply(QuestionPatch::new().with_value("1500")).unwrap();
            q.toggle_completion().unwrap();
            q.apply(QuestionPatch::new().with_value("1600")).unwrap();
            assert_eq!(q.status(), QuestionStatus::Completed);
        }

        #[test]
        fn ai_suggestion_is_settable_and_clearable() {
            let mut q = question();
            q.apply(QuestionPatch::new().with_ai_suggestion("Around 1200 kWh"))
                .unwrap();
            assert_eq!(q.ai_suggestion(), Some("Around 1200 kWh"));
            q.apply(QuestionPatch::new().clear_ai_suggestion()).unwrap();
            assert_eq!(q.ai_suggestion(), None);
        }
    }

    mod toggle {
        use super::*;

        #[test]
        fn toggle_without_value_is_rejected() {
            let mut q = question();
            assert!(q.toggle_completion().is_err());
            assert_eq!(q.status(), QuestionStatus::NotStarted);
        }

        #[test]
        fn toggle_with_value_completes_then_reverts() {
            let mut q = question();
            q.apply(QuestionPatch::new().with_value("1500")).unwrap();
            q.toggle_completion().unwrap();
            assert_eq!(q.status(), QuestionStatus::Completed);
            q.toggle_completion().unwrap();
            assert_eq!(q.status(), QuestionStatus::InProgress);
        }
    }

    mod evidence_links {
        use super::*;

        #[test]
        fn link_deduplicates() {
            let mut q = question();
            let ev = EvidenceId::new("ev-001").unwrap();
            assert!(q.link_evidence(ev.clone()));
            assert!(!q.link_evidence(ev.clone()));
            assert_eq!(q.evidence_ids(), &[ev]);
        }

        #[test]
        fn unlink_reports_removal() {
            let mut q = question();
            let ev = EvidenceId::new("ev-001").unwrap();
            q.link_evidence(ev.clone());
            assert!(q.unlink_evidence(&ev));
            assert!(!q.unlink_evidence(&ev));
            assert!(q.evidence_ids().is_empty());
        }
    }
}
