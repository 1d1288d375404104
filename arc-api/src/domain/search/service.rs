//! Search orchestration over the Childminder store and the Nanny gateway.

use async_trait::async_trait;
use uuid::Uuid;

use super::formatter::format_results;
use super::normalizer::normalize;
use super::orderer::order_results;
use super::query::{childminder_query, Expr};
use super::traits::{
    ApplicationSearch, ChildminderSearchRepository, NannySearchSource, Result, SearchError,
};
use super::types::{
    ApplicationSummary, FormattedSearchResult, SearchCriteria, SearchScope, SourceRecord,
};
use crate::domain::models::{ApplicationType, SubmissionStatus};

/// Search service combining the local Childminder store with the remote
/// Nanny source.
///
/// # Type Parameters
///
/// * `C` - ChildminderSearchRepository implementation for the local store
/// * `N` - NannySearchSource implementation for the record gateway
pub struct SearchService<C, N>
where
    C: ChildminderSearchRepository,
    N: NannySearchSource,
{
    childminders: C,
    nannies: N,
}

impl<C, N> SearchService<C, N>
where
    C: ChildminderSearchRepository,
    N: NannySearchSource,
{
    pub fn new(childminders: C, nannies: N) -> Self {
        Self {
            childminders,
            nannies,
        }
    }

    async fn childminder_records(&self, query: &Expr) -> Result<Vec<SourceRecord>> {
        let rows = self.childminders.search(query).await?;
        Ok(rows.into_iter().map(SourceRecord::Childminder).collect())
    }

    async fn nanny_records(&self, criteria: &SearchCriteria) -> Result<Vec<SourceRecord>> {
        let records = self.nannies.search(criteria).await?;
        Ok(records.into_iter().map(SourceRecord::Nanny).collect())
    }

    /// Raw records for `criteria`, Childminder rows before Nanny records.
    async fn combined_records(&self, criteria: &SearchCriteria) -> Result<Vec<SourceRecord>> {
        match criteria.application_type {
            SearchScope::Childminder => {
                let query = childminder_query(criteria)?;
                self.childminder_records(&query).await
            }
            SearchScope::Nanny => self.nanny_records(criteria).await,
            SearchScope::All => {
                // Built up front so a malformed date of birth fails before
                // either source is queried.
                let query = childminder_query(criteria)?;
                let (mut records, nannies) = tokio::try_join!(
                    self.childminder_records(&query),
                    self.nanny_records(criteria)
                )?;
                records.extend(nannies);
                Ok(records)
            }
        }
    }
}

#[async_trait]
impl<C, N> ApplicationSearch for SearchService<C, N>
where
    C: ChildminderSearchRepository + 'static,
    N: NannySearchSource + 'static,
{
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<FormattedSearchResult>> {
        let records = self.combined_records(criteria).await?;
        tracing::debug!(
            scope = %criteria.application_type,
            records = records.len(),
            "search sources answered"
        );

        let canonical = normalize(&self.childminders, records).await?;
        Ok(order_results(format_results(canonical)))
    }

    async fn summary(&self, application_id: Uuid) -> Result<ApplicationSummary> {
        if let Some(row) = self.childminders.find_application(application_id).await? {
            return Ok(ApplicationSummary {
                application_id: row.application_id,
                application_type: ApplicationType::Childminder,
                application_reference: row.application_reference,
                submission_status: SubmissionStatus::from(row.application_status),
            });
        }

        self.nannies
            .find_application(application_id)
            .await?
            .ok_or(SearchError::NotFound(application_id))
    }
}
