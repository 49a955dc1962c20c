//! Assessment domain - the VSME question set and its progress rules.

pub mod catalog;
mod question;

pub use question::{AnswerValue, EsgCategory, Question, QuestionPatch, QuestionStatus};
