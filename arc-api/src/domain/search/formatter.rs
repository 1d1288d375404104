//! Display decoration of canonical search results.

use super::types::{CanonicalSearchResult, FormattedSearchResult};
use crate::domain::models::SubmissionStatus;

/// Caseworker-facing label for a status. Unknown statuses have no label.
pub fn submission_type_label(status: &SubmissionStatus) -> &'static str {
    match status {
        SubmissionStatus::Drafting => "Draft",
        SubmissionStatus::Accepted => "Pending checks",
        SubmissionStatus::FurtherInformation => "Returned",
        SubmissionStatus::Submitted => "New",
        SubmissionStatus::ArcReview => "Assigned",
        SubmissionStatus::Other(_) => "",
    }
}

pub fn format_result(result: CanonicalSearchResult) -> FormattedSearchResult {
    let summary_link = format!("/arc/search-summary?id={}", result.application_id);
    let audit_link = format!(
        "/arc/auditlog?id={}&app_type={}",
        result.application_id, result.application_type
    );

    FormattedSearchResult {
        submission_type_label: submission_type_label(&result.submission_status).to_string(),
        summary_link,
        audit_link,
        application_id: result.application_id,
        application_reference: result.application_reference,
        application_type: result.application_type,
        applicant_name: result.applicant_name,
        date_submitted: result.date_submitted,
        date_accessed: result.date_accessed,
        submission_status: result.submission_status,
    }
}

pub fn format_results(results: Vec<CanonicalSearchResult>) -> Vec<FormattedSearchResult> {
    results.into_iter().map(format_result).collect()
}
