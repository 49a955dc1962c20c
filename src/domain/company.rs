//! Company profile - the singleton describing the reporting entity.
//!
//! Created once at store initialization, replaced wholesale via
//! `update_company`, never deleted.

use serde::{Deserialize, Serialize};

/// SME size band under the VSME standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompanySize {
    Micro,
    Small,
    Medium,
}

impl std::fmt::Display for CompanySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CompanySize::Micro => "Micro",
            CompanySize::Small => "Small",
            CompanySize::Medium => "Medium",
        };
        write!(f, "{}", s)
    }
}

/// Profile of the company running the self-assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub industry: String,
    pub size: CompanySize,
    pub location: String,
    pub reporting_year: i32,
}

impl CompanyProfile {
    /// Creates a new profile. No validation beyond type shape is performed;
    /// the settings dialog owns field-level checks.
    pub fn new(
        name: impl Into<String>,
        industry: impl Into<String>,
        size: CompanySize,
        location: impl Into<String>,
        reporting_year: i32,
    ) -> Self {
        Self {
            name: name.into(),
            industry: industry.into(),
            size,
            location: location.into(),
            reporting_year,
        }
    }
}
