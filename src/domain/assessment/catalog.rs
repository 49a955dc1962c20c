//! Seeded VSME Basic Module data.
//!
//! The store starts from this demo dataset: a medium manufacturer part-way
//! through its first reporting year. Ids are stable so the seeded evidence
//! links and action board stay consistent.

use chrono::{TimeZone, Utc};
use serde_json::{json, Map, Value};

use crate::domain::actions::{ActionPlanItem, ActionStatus, Effort, Impact};
use crate::domain::company::{CompanyProfile, CompanySize};
use crate::domain::evidence::{Evidence, EvidenceKind};
use crate::domain::foundation::{ActionId, EvidenceId, QuestionId, Timestamp};

use super::question::{AnswerValue, EsgCategory, Question, QuestionStatus};

fn qid(id: &str) -> QuestionId {
    QuestionId::new(id).expect("seed question id is non-empty")
}

fn evid(id: &str) -> EvidenceId {
    EvidenceId::new(id).expect("seed evidence id is non-empty")
}

fn aid(id: &str) -> ActionId {
    ActionId::new(id).expect("seed action id is non-empty")
}

fn date(y: i32, m: u32, d: u32) -> Timestamp {
    Timestamp::from_datetime(
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
            .single()
            .expect("seed date is valid"),
    )
}

/// Demo company profile.
pub fn default_company() -> CompanyProfile {
    CompanyProfile::new(
        "Viet Manufacturing Co., Ltd",
        "Manufacturing",
        CompanySize::Medium,
        "Ho Chi Minh City, Vietnam",
        2024,
    )
}

/// The seeded VSME Basic Module question set.
pub fn initial_questions() -> Vec<Question> {
    vec![
        Question::new(
            qid("E1"),
            EsgCategory::Environment,
            "Energy",
            "Total Electricity Consumption",
            "Please enter the total electricity consumed by your organization during the \
             reporting period.",
            Some("kWh".to_string()),
        ),
        Question::reconstitute(
            qid("E2"),
            EsgCategory::Environment,
            "GHG Emissions",
            "Scope 1 Emissions (Fuel)",
            "Direct emissions from owned or controlled sources (e.g., company vehicles, \
             generators).",
            Some(AnswerValue::Number(12500.0)),
            Some("tCO2e".to_string()),
            QuestionStatus::InProgress,
            vec![evid("ev-002")],
            Some(date(2024, 5, 10)),
        ),
        Question::reconstitute(
            qid("S1"),
            EsgCategory::Social,
            "Workforce",
            "Total Number of Employees",
            "Headcount as of the end of the reporting period.",
            Some(AnswerValue::Number(45.0)),
            Some("FTE".to_string()),
            QuestionStatus::Completed,
            vec![evid("ev-003")],
            None,
        ),
        Question::reconstitute(
            qid("S2"),
            EsgCategory::Social,
            "Health & Safety",
            "Work-related Injuries",
            "Number of recordable work-related injuries.",
            Some(AnswerValue::Number(0.0)),
            Some("Incidents".to_string()),
            QuestionStatus::Verified,
            Vec::new(),
            None,
        ),
        Question::reconstitute(
            qid("G1"),
            EsgCategory::Governance,
            "Ethics",
            "Code of Conduct",
            "Do you have a written Code of Conduct distributed to all employees?",
            Some(AnswerValue::from("Yes")),
            None,
            QuestionStatus::Completed,
            vec![evid("ev-001")],
            None,
        ),
    ]
}

/// Seeded evidence library.
pub fn initial_evidence() -> Vec<Evidence> {
    let mut fuel_facts = Map::new();
    fuel_facts.insert("liters".to_string(), json!(4500));
    fuel_facts.insert("type".to_string(), Value::String("Diesel".to_string()));

    vec![
        Evidence::reconstitute(
            evid("ev-001"),
            "Code_of_Conduct_2024.pdf",
            date(2024, 1, 15),
            EvidenceKind::Policy,
            Some(qid("G1")),
            None,
            None,
        ),
        Evidence::reconstitute(
            evid("ev-002"),
            "Fuel_Receipts_Q1.pdf",
            date(2024, 4, 2),
            EvidenceKind::Invoice,
            Some(qid("E2")),
            Some(fuel_facts),
            Some(0.92),
        ),
        Evidence::reconstitute(
            evid("ev-003"),
            "HR_Report_Dec2023.xlsx",
            date(2024, 1, 20),
            EvidenceKind::Report,
            Some(qid("S1")),
            None,
            None,
        ),
    ]
}

/// Seeded action board.
pub fn initial_actions() -> Vec<ActionPlanItem> {
    vec![
        ActionPlanItem::new(
            aid("a1"),
            "Install LED Lighting in Warehouse",
            Impact::Medium,
            Effort::Easy,
            ActionStatus::InProgress,
        )
        .expect("seed action is valid"),
        ActionPlanItem::new(
            aid("a2"),
            "Develop Supplier Code of Conduct",
            Impact::High,
            Effort::Medium,
            ActionStatus::Planned,
        )
        .expect("seed action is valid"),
        ActionPlanItem::new(
            aid("a3"),
            "Switch to Hybrid Company Cars",
            Impact::High,
            Effort::Hard,
            ActionStatus::Planned,
        )
        .expect("seed action is valid"),
    ]
}
