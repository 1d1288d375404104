//! Trait definitions for search domain abstractions.
//!
//! These traits enable dependency injection and easy testing through mocking.

use async_trait::async_trait;
use record_gateway::GatewayError;
use uuid::Uuid;

use super::query::Expr;
use super::types::{
    ApplicantName, ApplicationSummary, ChildminderRow, FormattedSearchResult, NannySearchRecord,
    SearchCriteria,
};

/// Error type for search operations.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Record gateway returned status {status_code} for '{resource}'")]
    Backend { resource: String, status_code: u16 },

    #[error("Malformed date of birth '{value}' (length {length})")]
    MalformedDate { value: String, length: usize },

    #[error("Application not found: {0}")]
    NotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Record gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

impl SearchError {
    pub fn malformed_date(value: &str) -> Self {
        Self::MalformedDate {
            value: value.to_string(),
            length: value.chars().count(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// Inbound port used by the HTTP layer.
#[async_trait]
pub trait ApplicationSearch: Send + Sync + 'static {
    /// Search both application sources and return display-ready results.
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<FormattedSearchResult>>;

    /// Look up the current status of one application in whichever source holds it.
    async fn summary(&self, application_id: Uuid) -> Result<ApplicationSummary>;
}

/// Local store of Childminder applications.
#[async_trait]
pub trait ChildminderSearchRepository: Send + Sync {
    /// Return every application matching `query`.
    async fn search(&self, query: &Expr) -> Result<Vec<ChildminderRow>>;

    /// Name record for an application, `None` when the applicant never gave one.
    async fn applicant_name(&self, application_id: Uuid) -> Result<Option<ApplicantName>>;

    /// A single application by id.
    async fn find_application(&self, application_id: Uuid) -> Result<Option<ChildminderRow>>;
}

/// Remote source of Nanny applications.
#[async_trait]
pub trait NannySearchSource: Send + Sync {
    /// Search the gateway. Only non-empty criteria are forwarded.
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<NannySearchRecord>>;

    /// Status lookup for a single application; `None` when the gateway has no such record.
    async fn find_application(&self, application_id: Uuid) -> Result<Option<ApplicationSummary>>;
}
