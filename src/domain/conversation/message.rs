//! Chat message entity.
//!
//! Messages are immutable records of copilot exchanges. The role vocabulary
//! follows the generative service: the assistant side is `model`.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MessageId, Timestamp, ValidationError};

/// Role of a message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User input.
    User,
    /// Generative model response (or a canned assistant message).
    Model,
}

/// An immutable message within the copilot conversation.
///
/// # Invariants
///
/// - `text` is non-empty (validated at construction)
/// - messages are never mutated or removed once appended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: MessageId,
    role: Role,
    text: String,
    timestamp: Timestamp,
}

impl ChatMessage {
    /// Creates a new message with a caller-chosen id.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the text is blank
    pub fn new(id: MessageId, role: Role, text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("text"));
        }
        Ok(Self {
            id,
            role,
            text,
            timestamp: Timestamp::now(),
        })
    }

    /// Creates a user message with a fresh id.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the text is blank
    pub fn user(text: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(MessageId::fresh(), Role::User, text)
    }

    /// Creates a model message with a fresh id.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the text is blank
    pub fn model(text: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(MessageId::fresh(), Role::Model, text)
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    /// Returns true if this message is from the user.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}
