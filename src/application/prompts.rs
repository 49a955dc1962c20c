//! Prompt templates for the four copilot request kinds.

use crate::domain::company::CompanyProfile;
use crate::domain::evidence::EvidenceKind;

use super::context::{ChatContext, SuggestionContext};

/// System prompt guiding open-ended chat.
pub fn chat_system_prompt(context: &ChatContext) -> String {
    format!(
        r#"You are an expert ESG Copilot for Small and Medium Enterprises (SMEs) in Vietnam/ASEAN.
Your goal is to guide non-expert business owners through the VSME (Voluntary SME) reporting standard.

Current User Context:
- Page: {page}
- Focused Question: {focused}
- Description of Question: {description}

Tone: Professional, encouraging, simplified, and helpful. Avoid overly complex jargon.
If the user asks about calculation, explain the formula simply (e.g., Activity Data x Emission Factor).
If the user is stuck, suggest types of documents they might look for (e.g., electricity bills, payroll records).

Keep responses concise unless asked for a detailed explanation."#,
        page = context.page,
        focused = context.focused_label(),
        description = context.focused_description(),
    )
}

/// Prompt asking for a single realistic value.
pub fn suggestion_prompt(context: &SuggestionContext) -> String {
    let answer_shape = if context.is_numeric {
        format!(
            "Reply with a single realistic number{} and nothing else.",
            context
                .unit
                .as_deref()
                .map(|u| format!(" (in {})", u))
                .unwrap_or_default()
        )
    } else {
        "Reply with one short sentence and nothing else.".to_string()
    };

    format!(
        r#"Suggest a plausible answer for an ESG assessment question.

Company: a {size} {industry} business in {location}.
Topic: {topic}
Question: {question}

{answer_shape}"#,
        size = context.company_size,
        industry = context.industry,
        location = context.location,
        topic = context.topic,
        question = context.question_text,
        answer_shape = answer_shape,
    )
}

/// Prompt for the document-extraction simulation.
///
/// The simulation never reads file bytes; it asks the model what data
/// typically resides in a document with this name and type.
pub fn extraction_prompt(filename: &str, kind: EvidenceKind) -> String {
    format!(
        r#"Simulate a data extraction result for an uploaded file named "{filename}" of type "{kind}".
Assume this is for an SME's ESG report.

If it looks like an electricity bill, extract kWh and Cost.
If it looks like an HR report, extract Headcount and Gender Ratio.
If it is a policy, summarize the key commitments.

Return a short paragraph summarizing the "extracted" facts."#,
        filename = filename,
        kind = kind,
    )
}

/// Prompt for structured action-plan generation.
pub fn action_plan_prompt(profile: &CompanyProfile, unfinished_topics: &[String]) -> String {
    let gaps = if unfinished_topics.is_empty() {
        "General ESG readiness".to_string()
    } else {
        unfinished_topics.join(", ")
    };

    format!(
        r#"Generate 3 to 5 ESG improvement actions for a {size} {industry} company in {location} (reporting year {year}).

Focus on the assessment areas still showing gaps: {gaps}.

Each action needs a concise title, its expected impact, the implementation effort, and a starting status."#,
        size = profile.size,
        industry = profile.industry,
        location = profile.location,
        year = profile.reporting_year,
        gaps = gaps,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::context::ChatContext;
    use crate::domain::assessment::catalog;

    #[test]
    fn chat_prompt_carries_context() {
        let questions = catalog::initial_questions();
        let ctx = ChatContext::new("Assessment", Some(&questions[0]));
        let prompt = chat_system_prompt(&ctx);

        assert!(prompt.contains("Page: Assessment"));
        assert!(prompt.contains("Energy: Total Electricity Consumption"));
        assert!(prompt.contains("VSME"));
    }

    #[test]
    fn chat_prompt_without_focus_says_none() {
        let prompt = chat_system_prompt(&ChatContext::new("Dashboard", None));
        assert!(prompt.contains("Focused Question: None"));
    }

    #[test]
    fn suggestion_prompt_shapes_numeric_answers() {
        let questions = catalog::initial_questions();
        let ctx = crate::application::context::SuggestionContext::new(
            &questions[0],
            &catalog::default_company(),
        );
        let prompt = suggestion_prompt(&ctx);
        assert!(prompt.contains("single realistic number"));
        assert!(prompt.contains("(in kWh)"));
        assert!(prompt.contains("Medium Manufacturing business"));
    }

    #[test]
    fn extraction_prompt_names_file_and_kind() {
        let prompt = extraction_prompt("May_Electricity.pdf", EvidenceKind::Invoice);
        assert!(prompt.contains("\"May_Electricity.pdf\""));
        assert!(prompt.contains("\"Invoice\""));
    }

    #[test]
    fn plan_prompt_lists_gaps() {
        let prompt = action_plan_prompt(
            &catalog::default_company(),
            &["Energy".to_string(), "GHG Emissions".to_string()],
        );
        assert!(prompt.contains("Energy, GHG Emissions"));
        assert!(prompt.contains("3 to 5"));
    }

    #[test]
    fn plan_prompt_handles_no_gaps() {
        let prompt = action_plan_prompt(&catalog::default_company(), &[]);
        assert!(prompt.contains("General ESG readiness"));
    }
}
