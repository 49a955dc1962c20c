//! Prompt context builders - pure snapshots of store state for AI requests.
//!
//! Nothing here performs network calls or mutation; isolating context
//! assembly keeps every request deterministic and testable without the
//! external service.

use crate::domain::assessment::Question;
use crate::domain::company::{CompanyProfile, CompanySize};

/// What the copilot knows about where the user is.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatContext {
    /// Readable label of the current page.
    pub page: String,
    /// Snapshot of the focused question, if any.
    pub focused: Option<FocusedQuestion>,
}

/// The focused question's prompt-relevant fields.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusedQuestion {
    pub topic: String,
    pub text: String,
    pub description: String,
}

impl ChatContext {
    /// Builds the chat context for a page and optional focused question.
    pub fn new(page: impl Into<String>, focused_question: Option<&Question>) -> Self {
        Self {
            page: page.into(),
            focused: focused_question.map(|q| FocusedQuestion {
                topic: q.topic().to_string(),
                text: q.text().to_string(),
                description: q.description().to_string(),
            }),
        }
    }

    /// Renders the focused question line for the system prompt.
    pub fn focused_label(&self) -> String {
        match &self.focused {
            Some(q) => format!("{}: {}", q.topic, q.text),
            None => "None".to_string(),
        }
    }

    /// Renders the focused question's description, empty when unfocused.
    pub fn focused_description(&self) -> &str {
        self.focused
            .as_ref()
            .map(|q| q.description.as_str())
            .unwrap_or("")
    }
}

/// De-duplicated ordered list of topics still needing work.
///
/// Scopes action-plan generation to real gaps: topics of questions whose
/// status is `not_started` or `in_progress`, first occurrence wins.
pub fn unfinished_topics(questions: &[Question]) -> Vec<String> {
    let mut topics = Vec::new();
    for q in questions {
        if q.status().is_unfinished() && !topics.iter().any(|t| t == q.topic()) {
            topics.push(q.topic().to_string());
        }
    }
    topics
}

/// The minimal fields needed to ask for a realistic value suggestion.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionContext {
    pub topic: String,
    pub question_text: String,
    pub unit: Option<String>,
    pub company_size: CompanySize,
    pub industry: String,
    pub location: String,
    /// Numeric questions ask for a number-as-text; narrative ones for prose.
    pub is_numeric: bool,
}

impl SuggestionContext {
    /// Builds the suggestion context from a question and the profile.
    pub fn new(question: &Question, profile: &CompanyProfile) -> Self {
        Self {
            topic: question.topic().to_string(),
            question_text: question.text().to_string(),
            unit: question.unit().map(|u| u.to_string()),
            company_size: profile.size,
            industry: profile.industry.clone(),
            location: profile.location.clone(),
            is_numeric: question.unit().is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{catalog, EsgCategory, QuestionPatch, QuestionStatus};
    use crate::domain::foundation::QuestionId;

    fn sample_question() -> Question {
        catalog::initial_questions().remove(0)
    }

    mod chat_context {
        use super::*;

        #[test]
        fn unfocused_context_says_none() {
            let ctx = ChatContext::new("Dashboard", None);
            assert_eq!(ctx.page, "Dashboard");
            assert_eq!(ctx.focused_label(), "None");
            assert_eq!(ctx.focused_description(), "");
        }

        #[test]
        fn focused_context_snapshots_question() {
            let q = sample_question();
            let ctx = ChatContext::new("Assessment", Some(&q));
            assert_eq!(ctx.focused_label(), "Energy: Total Electricity Consumption");
            assert!(ctx.focused_description().contains("electricity"));
        }
    }

    mod topics {
        use super::*;

        #[test]
        fn seeded_unfinished_topics_are_gaps_only() {
            let questions = catalog::initial_questions();
            // E1 not_started (Energy), E2 in_progress (GHG Emissions);
            // everything else is completed or verified.
            assert_eq!(unfinished_topics(&questions), vec!["Energy", "GHG Emissions"]);
        }

        #[test]
        fn duplicate_topics_collapse_in_order() {
            let mut questions = catalog::initial_questions();
            questions.push(Question::new(
                QuestionId::new("E3").unwrap(),
                EsgCategory::Environment,
                "Energy",
                "Renewable Share",
                "Share of renewable electricity.",
                Some("%".to_string()),
            ));
            assert_eq!(unfinished_topics(&questions), vec!["Energy", "GHG Emissions"]);
        }

        #[test]
        fn finished_assessment_yields_no_topics() {
            let mut questions = catalog::initial_questions();
            for q in &mut questions {
                if q.status() == QuestionStatus::NotStarted
                    || q.status() == QuestionStatus::InProgress
                {
                    q.apply(
                        QuestionPatch::new()
                            .with_value("done")
                            .with_status(QuestionStatus::Completed),
                    )
                    .unwrap();
                }
            }
            assert!(unfinished_topics(&questions).is_empty());
        }
    }

    mod suggestion {
        use super::*;

        #[test]
        fn numeric_questions_are_flagged() {
            let profile = catalog::default_company();
            let ctx = SuggestionContext::new(&sample_question(), &profile);
            assert!(ctx.is_numeric);
            assert_eq!(ctx.unit.as_deref(), Some("kWh"));
            assert_eq!(ctx.industry, "Manufacturing");
        }

        #[test]
        fn narrative_questions_are_not_numeric() {
            let questions = catalog::initial_questions();
            let g1 = questions.iter().find(|q| q.id().as_str() == "G1").unwrap();
            let ctx = SuggestionContext::new(g1, &catalog::default_company());
            assert!(!ctx.is_numeric);
            assert!(ctx.unit.is_none());
        }
    }
}
