use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The two kinds of registration handled by the review service.
///
/// Childminder applications live in the local database, Nanny applications
/// behind the record gateway.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum ApplicationType {
    Childminder,
    Nanny,
}

/// Review status of an application as stored by either source.
///
/// Codes that the service does not know are kept verbatim in `Other` so they
/// can still be displayed and round-tripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubmissionStatus {
    Drafting,
    Accepted,
    FurtherInformation,
    Submitted,
    ArcReview,
    Other(String),
}

impl SubmissionStatus {
    pub fn as_code(&self) -> &str {
        match self {
            Self::Drafting => "DRAFTING",
            Self::Accepted => "ACCEPTED",
            Self::FurtherInformation => "FURTHER_INFORMATION",
            Self::Submitted => "SUBMITTED",
            Self::ArcReview => "ARC_REVIEW",
            Self::Other(code) => code,
        }
    }
}

impl From<&str> for SubmissionStatus {
    fn from(code: &str) -> Self {
        match code {
            "DRAFTING" => Self::Drafting,
            "ACCEPTED" => Self::Accepted,
            "FURTHER_INFORMATION" => Self::FurtherInformation,
            "SUBMITTED" => Self::Submitted,
            "ARC_REVIEW" => Self::ArcReview,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for SubmissionStatus {
    fn from(code: String) -> Self {
        Self::from(code.as_str())
    }
}

impl From<SubmissionStatus> for String {
    fn from(status: SubmissionStatus) -> Self {
        status.as_code().to_string()
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}
