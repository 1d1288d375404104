//! Core types for the application search domain.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};
use time::OffsetDateTime;
use uuid::Uuid;

use super::traits::SearchError;
use crate::domain::models::{ApplicationType, SubmissionStatus};

/// Which sources a search covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum SearchScope {
    All,
    Childminder,
    Nanny,
}

impl FromStr for SearchScope {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "childminder" => Ok(Self::Childminder),
            "nanny" => Ok(Self::Nanny),
            _ => Err(SearchError::InvalidArgument(format!(
                "unknown application type '{}'",
                s
            ))),
        }
    }
}

/// Search input as entered by a caseworker. Empty fields mean "no filter".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub name: String,
    pub date_of_birth: String,
    pub home_postcode: String,
    pub care_location_postcode: String,
    pub reference: String,
    pub application_type: SearchScope,
}

impl SearchCriteria {
    /// Criteria with every filter empty.
    pub fn new(application_type: SearchScope) -> Self {
        Self {
            name: String::new(),
            date_of_birth: String::new(),
            home_postcode: String::new(),
            care_location_postcode: String::new(),
            reference: String::new(),
            application_type,
        }
    }
}

/// An application row from the local Childminder store.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ChildminderRow {
    pub application_id: Uuid,
    pub application_reference: Option<String>,
    pub application_status: String,
    pub date_submitted: Option<OffsetDateTime>,
    pub date_accessed: Option<OffsetDateTime>,
}

/// Name record of a Childminder applicant.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ApplicantName {
    pub first_name: String,
    pub last_name: String,
}

impl ApplicantName {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A search hit as returned by the record gateway. The gateway already uses
/// the canonical field names. Unsubmitted drafts carry `null` for the
/// submission date and sometimes the name.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NannySearchRecord {
    pub application_id: Uuid,
    #[serde(default)]
    pub application_reference: Option<String>,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub applicant_name: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub date_submitted: String,
    #[serde(default)]
    pub date_accessed: Option<String>,
    #[serde(rename = "submission_type")]
    pub submission_status: SubmissionStatus,
}

/// A raw record from either source, before normalisation.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceRecord {
    Childminder(ChildminderRow),
    Nanny(NannySearchRecord),
}

/// The single shape both sources are converted into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalSearchResult {
    pub application_id: Uuid,
    pub application_reference: Option<String>,
    pub application_type: ApplicationType,
    pub applicant_name: String,
    /// `dd/mm/yyyy`, empty when the application was never submitted.
    pub date_submitted: String,
    /// `dd/mm/yyyy`, `None` when no caseworker has opened the application.
    pub date_accessed: Option<String>,
    #[serde(rename = "submission_type")]
    pub submission_status: SubmissionStatus,
}

/// A canonical result decorated for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedSearchResult {
    pub application_id: Uuid,
    pub application_reference: Option<String>,
    pub application_type: ApplicationType,
    pub applicant_name: String,
    pub date_submitted: String,
    pub date_accessed: Option<String>,
    pub submission_status: SubmissionStatus,
    /// Caseworker-facing label for `submission_status`.
    #[serde(rename = "submission_type")]
    pub submission_type_label: String,
    pub summary_link: String,
    pub audit_link: String,
}

/// Status of a single application, used by the summary page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationSummary {
    pub application_id: Uuid,
    pub application_type: ApplicationType,
    pub application_reference: Option<String>,
    pub submission_status: SubmissionStatus,
}
