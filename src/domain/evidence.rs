//! Evidence documents - uploaded support for assessment answers.
//!
//! An evidence entity records file metadata only; the document bytes never
//! enter the system. Extraction results, when a caller chooses to persist
//! them, land in `extracted_data`/`confidence_score`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::{EvidenceId, QuestionId, Timestamp, ValidationError};

/// Document classification used to steer the extraction simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvidenceKind {
    Invoice,
    Policy,
    Report,
    Other,
}

impl std::fmt::Display for EvidenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EvidenceKind::Invoice => "Invoice",
            EvidenceKind::Policy => "Policy",
            EvidenceKind::Report => "Report",
            EvidenceKind::Other => "Other",
        };
        write!(f, "{}", s)
    }
}

/// An uploaded supporting document.
///
/// `related_question_id` is a weak reference: it is never cascaded and may
/// point at a question that no longer links back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    id: EvidenceId,
    filename: String,
    upload_date: Timestamp,
    kind: EvidenceKind,
    related_question_id: Option<QuestionId>,
    extracted_data: Option<Map<String, Value>>,
    confidence_score: Option<f64>,
}

impl Evidence {
    /// Creates a new evidence record for an upload happening now.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the filename is blank
    pub fn new(
        id: EvidenceId,
        filename: impl Into<String>,
        kind: EvidenceKind,
        related_question_id: Option<QuestionId>,
    ) -> Result<Self, ValidationError> {
        let filename = filename.into();
        if filename.trim().is_empty() {
            return Err(ValidationError::empty_field("filename"));
        }
        Ok(Self {
            id,
            filename,
            upload_date: Timestamp::now(),
            kind,
            related_question_id,
            extracted_data: None,
            confidence_score: None,
        })
    }

    /// Reconstitutes an evidence record in a known state (catalog seeds).
    pub fn reconstitute(
        id: EvidenceId,
        filename: impl Into<String>,
        upload_date: Timestamp,
        kind: EvidenceKind,
        related_question_id: Option<QuestionId>,
        extracted_data: Option<Map<String, Value>>,
        confidence_score: Option<f64>,
    ) -> Self {
        Self {
            id,
            filename: filename.into(),
            upload_date,
            kind,
            related_question_id,
            extracted_data,
            confidence_score,
        }
    }

    pub fn id(&self) -> &EvidenceId {
        &self.id
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn upload_date(&self) -> &Timestamp {
        &self.upload_date
    }

    pub fn kind(&self) -> EvidenceKind {
        self.kind
    }

    pub fn related_question_id(&self) -> Option<&QuestionId> {
        self.related_question_id.as_ref()
    }

    pub fn extracted_data(&self) -> Option<&Map<String, Value>> {
        self.extracted_data.as_ref()
    }

    pub fn confidence_score(&self) -> Option<f64> {
        self.confidence_score
    }

    /// Returns true once extraction facts have been persisted.
    pub fn has_extraction(&self) -> bool {
        self.extracted_data.is_some()
    }

    /// Persists extraction facts on the record (store-mediated).
    pub(crate) fn record_extraction(&mut self, data: Map<String, Value>, confidence: f64) {
        self.extracted_data = Some(data);
        self.confidence_score = Some(confidence.clamp(0.0, 1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evidence() -> Evidence {
        Evidence::new(
            EvidenceId::new("ev-010").unwrap(),
            "May_Electricity.pdf",
            EvidenceKind::Invoice,
            None,
        )
        .unwrap()
    }

    #[test]
    fn rejects_blank_filename() {
        let result = Evidence::new(
            EvidenceId::new("ev-010").unwrap(),
            "  ",
            EvidenceKind::Other,
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_upload_has_no_extraction() {
        let ev = evidence();
        assert!(!ev.has_extraction());
        assert_eq!(ev.confidence_score(), None);
    }

    #[test]
    fn record_extraction_clamps_confidence() {
        let mut ev = evidence();
        ev.record_extraction(Map::new(), 1.7);
        assert!(ev.has_extraction());
        assert_eq!(ev.confidence_score(), Some(1.0));
    }

    #[test]
    fn kind_displays_wire_spelling() {
        assert_eq!(EvidenceKind::Invoice.to_string(), "Invoice");
        assert_eq!(EvidenceKind::Other.to_string(), "Other");
    }
}
