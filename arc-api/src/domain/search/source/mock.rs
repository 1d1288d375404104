//! Mock Nanny source for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::search::traits::{NannySearchSource, Result, SearchError};
use crate::domain::search::types::{ApplicationSummary, NannySearchRecord, SearchCriteria};

/// Mock Nanny source returning fixed records, or a fixed gateway status.
#[derive(Clone, Default)]
pub struct MockNannySource {
    records: Arc<Vec<NannySearchRecord>>,
    summaries: Arc<Vec<ApplicationSummary>>,
    status_code: Option<u16>,
    search_calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl MockNannySource {
    pub fn returning(records: Vec<NannySearchRecord>) -> Self {
        Self {
            records: Arc::new(records),
            ..Self::default()
        }
    }

    /// A source whose gateway answers every search with `status_code`.
    pub fn responding_with_status(status_code: u16) -> Self {
        Self {
            status_code: Some(status_code),
            ..Self::default()
        }
    }

    pub fn with_summaries(mut self, summaries: Vec<ApplicationSummary>) -> Self {
        self.summaries = Arc::new(summaries);
        self
    }

    /// Number of times `search` was called.
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NannySearchSource for MockNannySource {
    async fn search(&self, _criteria: &SearchCriteria) -> Result<Vec<NannySearchRecord>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        match self.status_code {
            Some(status_code) => Err(SearchError::Backend {
                resource: "arc-search".to_string(),
                status_code,
            }),
            None => Ok(self.records.as_ref().clone()),
        }
    }

    async fn find_application(&self, application_id: Uuid) -> Result<Option<ApplicationSummary>> {
        Ok(self
            .summaries
            .iter()
            .find(|summary| summary.application_id == application_id)
            .cloned())
    }
}
