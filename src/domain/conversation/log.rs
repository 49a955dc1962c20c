//! Conversation log - the append-only chat transcript.

use tracing::debug;

use crate::domain::assessment::Question;
use crate::domain::foundation::MessageId;

use super::message::{ChatMessage, Role};

/// First message every session starts with.
pub const WELCOME_MESSAGE: &str = "Hi! I'm your ESG Copilot. I can help you understand questions, \
     calculate metrics, or draft content for your report. How can I help today?";

/// Append-only ordered sequence of chat messages.
///
/// Starts with the fixed welcome entry. Messages are never mutated or
/// removed; the contextual hint for a question is inserted at most once per
/// question id, however often the question is refocused.
#[derive(Debug, Clone)]
pub struct ConversationLog {
    messages: Vec<ChatMessage>,
}

impl ConversationLog {
    /// Creates a log seeded with the welcome message.
    pub fn new() -> Self {
        let welcome = ChatMessage::new(MessageId::welcome(), Role::Model, WELCOME_MESSAGE)
            .expect("welcome message is non-empty");
        Self {
            messages: vec![welcome],
        }
    }

    /// Returns the transcript in append order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Returns the number of messages, welcome included.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns false always; the welcome entry is permanent.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Appends a user turn with a fresh id, returning its id.
    ///
    /// Blank text is ignored and yields `None`.
    pub fn append_user_message(&mut self, text: impl Into<String>) -> Option<MessageId> {
        let message = ChatMessage::user(text).ok()?;
        let id = message.id().clone();
        self.messages.push(message);
        Some(id)
    }

    /// Appends a model turn with a fresh id, returning its id.
    ///
    /// Blank text is ignored and yields `None`.
    pub fn append_model_message(&mut self, text: impl Into<String>) -> Option<MessageId> {
        let message = ChatMessage::model(text).ok()?;
        let id = message.id().clone();
        self.messages.push(message);
        Some(id)
    }

    /// Inserts the contextual hint for a question, at most once per id.
    ///
    /// Returns true if the hint was newly appended.
    pub fn ensure_contextual_hint(&mut self, question: &Question) -> bool {
        let hint_id = MessageId::hint(question.id());
        if self.messages.iter().any(|m| m.id() == &hint_id) {
            return false;
        }
        let text = format!(
            "I see you're working on **{}**. Need help with definitions or calculations for *{}*?",
            question.topic(),
            question.text()
        );
        let message = ChatMessage::new(hint_id, Role::Model, text)
            .expect("hint text is non-empty");
        debug!(question = %question.id(), "inserting contextual hint");
        self.messages.push(message);
        true
    }

    /// Returns true if a message with the given id exists.
    pub fn contains(&self, id: &MessageId) -> bool {
        self.messages.iter().any(|m| m.id() == id)
    }
}

impl Default for ConversationLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{EsgCategory, Question};
    use crate::domain::foundation::QuestionId;

    fn question(id: &str) -> Question {
        Question::new(
            QuestionId::new(id).unwrap(),
            EsgCategory::Environment,
            "Energy",
            "Total Electricity Consumption",
            "Total electricity consumed during the reporting period.",
            Some("kWh".to_string()),
        )
    }

    #[test]
    fn starts_with_welcome() {
        let log = ConversationLog::new();
        assert_eq!(log.len(), 1);
        assert_eq!(log.messages()[0].id(), &MessageId::welcome());
        assert_eq!(log.messages()[0].role(), Role::Model);
        assert_eq!(log.messages()[0].text(), WELCOME_MESSAGE);
    }

    #[test]
    fn appends_preserve_order() {
        let mut log = ConversationLog::new();
        log.append_user_message("What is Scope 1?").unwrap();
        log.append_model_message("Scope 1 covers direct emissions.")
            .unwrap();
        let roles: Vec<Role> = log.messages().iter().map(|m| m.role()).collect();
        assert_eq!(roles, vec![Role::Model, Role::User, Role::Model]);
    }

    #[test]
    fn blank_appends_are_ignored() {
        let mut log = ConversationLog::new();
        assert!(log.append_user_message("  ").is_none());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn hint_is_inserted_once_per_question() {
        let mut log = ConversationLog::new();
        let q = question("E1");
        assert!(log.ensure_contextual_hint(&q));
        assert!(!log.ensure_contextual_hint(&q));
        let hint_count = log
            .messages()
            .iter()
            .filter(|m| m.id() == &MessageId::hint(q.id()))
            .count();
        assert_eq!(hint_count, 1);
    }

    #[test]
    fn hints_for_distinct_questions_coexist() {
        let mut log = ConversationLog::new();
        assert!(log.ensure_contextual_hint(&question("E1")));
        assert!(log.ensure_contextual_hint(&question("E2")));
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn hint_mentions_topic_and_text() {
        let mut log = ConversationLog::new();
        let q = question("E1");
        log.ensure_contextual_hint(&q);
        let hint = log.messages().last().unwrap();
        assert!(hint.text().contains("Energy"));
        assert!(hint.text().contains("Total Electricity Consumption"));
    }
}
