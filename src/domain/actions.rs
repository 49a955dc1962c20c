//! Action-plan items - remediation tasks on the status board.
//!
//! The serde spellings on the enums double as the wire contract for
//! schema-constrained plan generation: a response value outside these
//! enumerations fails deserialization and the whole plan is discarded.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ActionId, ValidationError};

/// Expected ESG impact of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Impact::High => "High",
            Impact::Medium => "Medium",
            Impact::Low => "Low",
        };
        write!(f, "{}", s)
    }
}

/// Implementation effort of an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effort {
    Hard,
    Medium,
    Easy,
}

impl std::fmt::Display for Effort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Effort::Hard => "Hard",
            Effort::Medium => "Medium",
            Effort::Easy => "Easy",
        };
        write!(f, "{}", s)
    }
}

/// Board column an action sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionStatus {
    Planned,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl std::fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActionStatus::Planned => "Planned",
            ActionStatus::InProgress => "In Progress",
            ActionStatus::Done => "Done",
        };
        write!(f, "{}", s)
    }
}

/// Partial update applied to an action-plan item.
#[derive(Debug, Clone, Default)]
pub struct ActionPatch {
    title: Option<String>,
    impact: Option<Impact>,
    effort: Option<Effort>,
    status: Option<ActionStatus>,
}

impl ActionPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the impact.
    pub fn with_impact(mut self, impact: Impact) -> Self {
        self.impact = Some(impact);
        self
    }

    /// Sets the effort.
    pub fn with_effort(mut self, effort: Effort) -> Self {
        self.effort = Some(effort);
        self
    }

    /// Moves the item to another board column.
    pub fn with_status(mut self, status: ActionStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// A remediation task tracked on the action board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlanItem {
    id: ActionId,
    title: String,
    impact: Impact,
    effort: Effort,
    status: ActionStatus,
}

impl ActionPlanItem {
    /// Creates a new action-plan item.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the title is blank
    pub fn new(
        id: ActionId,
        title: impl Into<String>,
        impact: Impact,
        effort: Effort,
        status: ActionStatus,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        Ok(Self {
            id,
            title,
            impact,
            effort,
            status,
        })
    }

    pub fn id(&self) -> &ActionId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn impact(&self) -> Impact {
        self.impact
    }

    pub fn effort(&self) -> Effort {
        self.effort
    }

    pub fn status(&self) -> ActionStatus {
        self.status
    }

    /// Applies a partial update. Blank titles are ignored rather than
    /// clearing the existing one.
    pub(crate) fn apply(&mut self, patch: ActionPatch) {
        if let Some(title) = patch.title {
            if !title.trim().is_empty() {
                self.title = title;
            }
        }
        if let Some(impact) = patch.impact {
            self.impact = impact;
        }
        if let Some(effort) = patch.effort {
            self.effort = effort;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> ActionPlanItem {
        ActionPlanItem::new(
            ActionId::new("a1").unwrap(),
            "Install LED Lighting in Warehouse",
            Impact::Medium,
            Effort::Easy,
            ActionStatus::InProgress,
        )
        .unwrap()
    }

    #[test]
    fn rejects_blank_title() {
        let result = ActionPlanItem::new(
            ActionId::new("a9").unwrap(),
            "   ",
            Impact::Low,
            Effort::Easy,
            ActionStatus::Planned,
        );
        assert!(result.is_err());
    }

    #[test]
    fn status_serializes_with_space() {
        let json = serde_json::to_string(&ActionStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let back: ActionStatus = serde_json::from_str("\"In Progress\"").unwrap();
        assert_eq!(back, ActionStatus::InProgress);
    }

    #[test]
    fn out_of_enumeration_values_fail_to_parse() {
        assert!(serde_json::from_str::<Impact>("\"Severe\"").is_err());
        assert!(serde_json::from_str::<Effort>("\"Trivial\"").is_err());
        assert!(serde_json::from_str::<ActionStatus>("\"Doing\"").is_err());
    }

    #[test]
    fn patch_updates_selected_fields() {
        let mut action = item();
        action.apply(ActionPatch::new().with_status(ActionStatus::Done));
        assert_eq!(action.status(), ActionStatus::Done);
        assert_eq!(action.impact(), Impact::Medium);
    }

    #[test]
    fn patch_ignores_blank_title() {
        let mut action = item();
        action.apply(ActionPatch::new().with_title("  "));
        assert_eq!(action.title(), "Install LED Lighting in Warehouse");
    }
}
