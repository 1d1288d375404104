//! Conversion of source-specific records into [`CanonicalSearchResult`].

use time::OffsetDateTime;

use super::traits::{ChildminderSearchRepository, Result};
use super::types::{CanonicalSearchResult, ChildminderRow, NannySearchRecord, SourceRecord};
use crate::domain::models::{ApplicationType, SubmissionStatus};

/// Normalise a combined list of source records, keeping their order.
pub async fn normalize<R>(
    repository: &R,
    records: Vec<SourceRecord>,
) -> Result<Vec<CanonicalSearchResult>>
where
    R: ChildminderSearchRepository + ?Sized,
{
    let mut results = Vec::with_capacity(records.len());
    for record in records {
        let result = match record {
            SourceRecord::Childminder(row) => from_childminder_row(repository, row).await?,
            SourceRecord::Nanny(record) => CanonicalSearchResult::from(record),
        };
        results.push(result);
    }
    Ok(results)
}

/// Local rows carry timestamps and no name; the name comes from a separate
/// lookup and is left empty when the applicant has no name record.
async fn from_childminder_row<R>(repository: &R, row: ChildminderRow) -> Result<CanonicalSearchResult>
where
    R: ChildminderSearchRepository + ?Sized,
{
    let applicant_name = repository
        .applicant_name(row.application_id)
        .await?
        .map(|name| name.full_name())
        .unwrap_or_default();

    Ok(CanonicalSearchResult {
        application_id: row.application_id,
        application_reference: row.application_reference,
        application_type: ApplicationType::Childminder,
        applicant_name,
        date_submitted: row.date_submitted.map(display_date).unwrap_or_default(),
        date_accessed: row.date_accessed.map(display_date),
        submission_status: SubmissionStatus::from(row.application_status),
    })
}

impl From<NannySearchRecord> for CanonicalSearchResult {
    fn from(record: NannySearchRecord) -> Self {
        Self {
            application_id: record.application_id,
            application_reference: record.application_reference,
            application_type: ApplicationType::Nanny,
            applicant_name: record.applicant_name,
            date_submitted: record.date_submitted,
            date_accessed: record.date_accessed,
            submission_status: record.submission_status,
        }
    }
}

/// `dd/mm/yyyy`
pub fn display_date(timestamp: OffsetDateTime) -> String {
    format!(
        "{:02}/{:02}/{:04}",
        timestamp.day(),
        u8::from(timestamp.month()),
        timestamp.year()
    )
}
