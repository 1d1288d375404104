//! Nanny search source backed by the record gateway.

use async_trait::async_trait;
use record_gateway::{GatewayClient, GatewayParams};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::models::{ApplicationType, SubmissionStatus};
use crate::domain::search::traits::{NannySearchSource, Result, SearchError};
use crate::domain::search::types::{ApplicationSummary, NannySearchRecord, SearchCriteria};

const SEARCH_RESOURCE: &str = "arc-search";
const APPLICATION_RESOURCE: &str = "application";

/// Application record as stored by the gateway; only the fields needed for a
/// status lookup are decoded.
#[derive(Debug, Deserialize)]
struct NannyApplication {
    application_id: Uuid,
    #[serde(default)]
    application_reference: Option<String>,
    application_status: SubmissionStatus,
}

#[derive(Clone)]
pub struct GatewayNannySource {
    client: GatewayClient,
}

impl GatewayNannySource {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }
}

/// Gateway parameters for a search. Empty criteria are dropped by
/// [`GatewayParams`], so only the filters a caseworker filled in are sent.
pub(crate) fn search_params(criteria: &SearchCriteria) -> GatewayParams {
    GatewayParams::new()
        .with("name", &criteria.name)
        .with("dob", &criteria.date_of_birth)
        .with("home_postcode", &criteria.home_postcode)
        .with("care_location_postcode", &criteria.care_location_postcode)
        .with("reference", &criteria.reference)
}

#[async_trait]
impl NannySearchSource for GatewayNannySource {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<NannySearchRecord>> {
        let response = self
            .client
            .list::<NannySearchRecord>(SEARCH_RESOURCE, &search_params(criteria))
            .await?;

        response
            .into_record()
            .map_err(|status_code| SearchError::Backend {
                resource: SEARCH_RESOURCE.to_string(),
                status_code,
            })
    }

    async fn find_application(&self, application_id: Uuid) -> Result<Option<ApplicationSummary>> {
        let params = GatewayParams::new().with("application_id", application_id.to_string());
        let response = self
            .client
            .read::<NannyApplication>(APPLICATION_RESOURCE, &params)
            .await?;

        if response.status_code == 404 {
            return Ok(None);
        }

        let application = response
            .into_record()
            .map_err(|status_code| SearchError::Backend {
                resource: APPLICATION_RESOURCE.to_string(),
                status_code,
            })?;

        Ok(Some(ApplicationSummary {
            application_id: application.application_id,
            application_type: ApplicationType::Nanny,
            application_reference: application.application_reference,
            submission_status: application.application_status,
        }))
    }
}
