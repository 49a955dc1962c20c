//! Assessment store - the single source of truth for entity state.
//!
//! Owns the company profile and the three mutable collections. Every
//! mutation goes through the operation contracts here, which are the sole
//! points of invariant enforcement: no operation partially applies, and an
//! invariant violation is rejected with state untouched.
//!
//! Observers registered via [`AssessmentStore::subscribe`] are notified
//! synchronously after each successful mutation, so a UI can re-render from
//! store state without polling.

use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::domain::actions::{ActionPatch, ActionPlanItem};
use crate::domain::assessment::{catalog, EsgCategory, Question, QuestionPatch, QuestionStatus};
use crate::domain::company::CompanyProfile;
use crate::domain::evidence::Evidence;
use crate::domain::foundation::{ActionId, DomainError, EvidenceId, QuestionId};

/// Notification emitted after each successful store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    CompanyUpdated,
    QuestionUpdated(QuestionId),
    EvidenceAdded(EvidenceId),
    EvidenceDeleted(EvidenceId),
    ExtractionRecorded(EvidenceId),
    ActionAdded(ActionId),
    ActionUpdated(ActionId),
    ActionDeleted(ActionId),
    ActionsReplaced,
}

/// Callback invoked synchronously on every store event.
pub type StoreObserver = Box<dyn Fn(&StoreEvent) + Send + Sync>;

/// Per-category progress counts for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryProgress {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub not_started: usize,
}

impl CategoryProgress {
    /// Completion percentage, counting verified answers as completed.
    pub fn percent_complete(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.completed * 100) / self.total) as u32
    }
}

/// The mutable entity graph behind the assessment UI.
///
/// Created once at application start; all state lives only for the session.
pub struct AssessmentStore {
    company: CompanyProfile,
    questions: Vec<Question>,
    evidence: Vec<Evidence>,
    actions: Vec<ActionPlanItem>,
    observers: Vec<StoreObserver>,
}

impl AssessmentStore {
    /// Creates a store seeded with the demo VSME dataset.
    pub fn new() -> Self {
        Self::with_data(
            catalog::default_company(),
            catalog::initial_questions(),
            catalog::initial_evidence(),
            catalog::initial_actions(),
        )
    }

    /// Creates a store from explicit collections.
    pub fn with_data(
        company: CompanyProfile,
        questions: Vec<Question>,
        evidence: Vec<Evidence>,
        actions: Vec<ActionPlanItem>,
    ) -> Self {
        Self {
            company,
            questions,
            evidence,
            actions,
            observers: Vec::new(),
        }
    }

    /// Registers an observer notified after every successful mutation.
    pub fn subscribe(&mut self, observer: StoreObserver) {
        self.observers.push(observer);
    }

    fn notify(&self, event: StoreEvent) {
        for observer in &self.observers {
            observer(&event);
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────

    pub fn company(&self) -> &CompanyProfile {
        &self.company
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Looks up a question by id.
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Evidence library in most-recent-first order.
    pub fn evidence(&self) -> &[Evidence] {
        &self.evidence
    }

    /// Looks up an evidence record by id.
    pub fn evidence_item(&self, id: &EvidenceId) -> Option<&Evidence> {
        self.evidence.iter().find(|e| e.id() == id)
    }

    pub fn actions(&self) -> &[ActionPlanItem] {
        &self.actions
    }

    /// Looks up an action by id.
    pub fn action(&self, id: &ActionId) -> Option<&ActionPlanItem> {
        self.actions.iter().find(|a| a.id() == id)
    }

    /// Progress counts for one category, recomputed from current state.
    pub fn category_progress(&self, category: EsgCategory) -> CategoryProgress {
        let mut progress = CategoryProgress::default();
        for q in self.questions.iter().filter(|q| q.category() == category) {
            progress.total += 1;
            match q.status() {
                QuestionStatus::Completed | QuestionStatus::Verified => progress.completed += 1,
                QuestionStatus::InProgress => progress.in_progress += 1,
                QuestionStatus::NotStarted => progress.not_started += 1,
            }
        }
        progress
    }

    /// Overall progress across all categories.
    pub fn overall_progress(&self) -> CategoryProgress {
        EsgCategory::ALL
            .iter()
            .map(|c| self.category_progress(*c))
            .fold(CategoryProgress::default(), |mut acc, p| {
                acc.total += p.total;
                acc.completed += p.completed;
                acc.in_progress += p.in_progress;
                acc.not_started += p.not_started;
                acc
            })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Company
    // ─────────────────────────────────────────────────────────────────────

    /// Replaces the company profile wholesale.
    ///
    /// Derived progress reads reflect the new profile immediately.
    pub fn update_company(&mut self, profile: CompanyProfile) {
        self.company = profile;
        self.notify(StoreEvent::CompanyUpdated);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Questions
    // ─────────────────────────────────────────────────────────────────────

    /// Applies a partial update to a question.
    ///
    /// # Errors
    ///
    /// - `QuestionNotFound` for an unknown id
    /// - `EmptyValueCompletion` when the patch would complete or verify a
    ///   question without a value; the question is left untouched
    pub fn update_question(
        &mut self,
        id: &QuestionId,
        patch: QuestionPatch,
    ) -> Result<(), DomainError> {
        let question = self
            .questions
            .iter_mut()
            .find(|q| q.id() == id)
            .ok_or_else(|| DomainError::question_not_found(id))?;
        question.apply(patch)?;
        debug!(question = %id, "question updated");
        self.notify(StoreEvent::QuestionUpdated(id.clone()));
        Ok(())
    }

    /// Toggles manual completion of a question.
    ///
    /// # Errors
    ///
    /// - `QuestionNotFound` for an unknown id
    /// - `EmptyValueCompletion` when no value is recorded
    pub fn toggle_completion(&mut self, id: &QuestionId) -> Result<(), DomainError> {
        let question = self
            .questions
            .iter_mut()
            .find(|q| q.id() == id)
            .ok_or_else(|| DomainError::question_not_found(id))?;
        question.toggle_completion()?;
        self.notify(StoreEvent::QuestionUpdated(id.clone()));
        Ok(())
    }

    /// Links an evidence document to a question.
    ///
    /// Returns true if the link was newly added (links are deduplicated).
    ///
    /// # Errors
    ///
    /// - `QuestionNotFound` / `EvidenceNotFound` when either end is unknown
    pub fn attach_evidence(
        &mut self,
        question_id: &QuestionId,
        evidence_id: &EvidenceId,
    ) -> Result<bool, DomainError> {
        if self.evidence_item(evidence_id).is_none() {
            return Err(DomainError::evidence_not_found(evidence_id));
        }
        let question = self
            .questions
            .iter_mut()
            .find(|q| q.id() == question_id)
            .ok_or_else(|| DomainError::question_not_found(question_id))?;
        let added = question.link_evidence(evidence_id.clone());
        if added {
            self.notify(StoreEvent::QuestionUpdated(question_id.clone()));
        }
        Ok(added)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Evidence
    // ─────────────────────────────────────────────────────────────────────

    /// Adds an uploaded document, prepending it to the library.
    ///
    /// Most-recent-first ordering is part of the observable contract. When
    /// the record names a known related question, the link is mirrored into
    /// that question's `evidence_ids`.
    ///
    /// # Errors
    ///
    /// - `DuplicateId` if an evidence record with the same id exists
    pub fn add_evidence(&mut self, item: Evidence) -> Result<(), DomainError> {
        if self.evidence_item(item.id()).is_some() {
            return Err(DomainError::duplicate_id(item.id()));
        }
        let id = item.id().clone();
        if let Some(question_id) = item.related_question_id().cloned() {
            if let Some(question) = self.questions.iter_mut().find(|q| q.id() == &question_id) {
                question.link_evidence(id.clone());
            }
        }
        self.evidence.insert(0, item);
        self.notify(StoreEvent::EvidenceAdded(id));
        Ok(())
    }

    /// Deletes an evidence record and cascade-cleans question links.
    ///
    /// The related questions themselves survive. Deleting an unknown id is
    /// a no-op; the return value reports whether anything was removed.
    pub fn delete_evidence(&mut self, id: &EvidenceId) -> bool {
        let before = self.evidence.len();
        self.evidence.retain(|e| e.id() != id);
        if self.evidence.len() == before {
            return false;
        }
        for question in &mut self.questions {
            question.unlink_evidence(id);
        }
        debug!(evidence = %id, "evidence deleted, links cascaded");
        self.notify(StoreEvent::EvidenceDeleted(id.clone()));
        true
    }

    /// Persists extraction facts on an evidence record.
    ///
    /// The copilot never calls this itself; it is the sanctioned path for a
    /// caller that wants to keep an extraction result.
    ///
    /// # Errors
    ///
    /// - `EvidenceNotFound` for an unknown id
    pub fn record_extraction(
        &mut self,
        id: &EvidenceId,
        data: Map<String, Value>,
        confidence: f64,
    ) -> Result<(), DomainError> {
        let item = self
            .evidence
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or_else(|| DomainError::evidence_not_found(id))?;
        item.record_extraction(data, confidence);
        self.notify(StoreEvent::ExtractionRecorded(id.clone()));
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────

    /// Adds a manually created action to the top of the board.
    ///
    /// # Errors
    ///
    /// - `DuplicateId` if an action with the same id exists
    pub fn add_action(&mut self, item: ActionPlanItem) -> Result<(), DomainError> {
        if self.action(item.id()).is_some() {
            return Err(DomainError::duplicate_id(item.id()));
        }
        let id = item.id().clone();
        self.actions.insert(0, item);
        self.notify(StoreEvent::ActionAdded(id));
        Ok(())
    }

    /// Applies a partial update to an action.
    ///
    /// An unknown id is a no-op; the return value reports whether an item
    /// was updated.
    pub fn update_action(&mut self, id: &ActionId, patch: ActionPatch) -> bool {
        match self.actions.iter_mut().find(|a| a.id() == id) {
            Some(action) => {
                action.apply(patch);
                self.notify(StoreEvent::ActionUpdated(id.clone()));
                true
            }
            None => false,
        }
    }

    /// Deletes an action. Unknown ids are a no-op.
    pub fn delete_action(&mut self, id: &ActionId) -> bool {
        let before = self.actions.len();
        self.actions.retain(|a| a.id() != id);
        if self.actions.len() == before {
            return false;
        }
        self.notify(StoreEvent::ActionDeleted(id.clone()));
        true
    }

    /// Installs a caller-assembled action collection.
    ///
    /// Caller contract: after plan generation the caller concatenates
    /// `existing ++ generated` and passes the result here; the store does
    /// not re-derive the merge. Duplicate ids are accepted verbatim but
    /// logged, since they indicate a caller bug.
    pub fn replace_actions(&mut self, actions: Vec<ActionPlanItem>) {
        let mut seen = HashSet::new();
        for item in &actions {
            if !seen.insert(item.id().clone()) {
                warn!(action = %item.id(), "replace_actions received a duplicate id");
            }
        }
        self.actions = actions;
        self.notify(StoreEvent::ActionsReplaced);
    }
}

impl Default for AssessmentStore {
    fn default() -> Self {
        Self::new()
    }
}
