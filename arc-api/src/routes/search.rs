use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::Caseworker,
    domain::search::{ApplicationSummary, FormattedSearchResult, SearchCriteria, SearchScope},
    routes::ApiError,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search))
        .route("/search-summary", get(summary))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct SearchQuery {
    name: String,
    dob: String,
    home_postcode: String,
    care_location_postcode: String,
    reference: String,
    application_type: String,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            name: String::new(),
            dob: String::new(),
            home_postcode: String::new(),
            care_location_postcode: String::new(),
            reference: String::new(),
            application_type: SearchScope::All.to_string(),
        }
    }
}

impl TryFrom<SearchQuery> for SearchCriteria {
    type Error = ApiError;

    fn try_from(query: SearchQuery) -> Result<Self, Self::Error> {
        let mut criteria = SearchCriteria::new(query.application_type.parse::<SearchScope>()?);
        criteria.name = query.name;
        criteria.date_of_birth = query.dob;
        criteria.home_postcode = query.home_postcode;
        criteria.care_location_postcode = query.care_location_postcode;
        criteria.reference = query.reference;
        Ok(criteria)
    }
}

#[instrument(name = "GET /arc/search", skip(app_state))]
async fn search(
    State(app_state): State<AppState>,
    caseworker: Caseworker,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<FormattedSearchResult>>, ApiError> {
    let criteria = SearchCriteria::try_from(query)?;
    let results = app_state.search.search(&criteria).await?;

    Ok(Json(results))
}

#[derive(Debug, Deserialize)]
struct SummaryQuery {
    id: Uuid,
}

#[instrument(name = "GET /arc/search-summary", skip(app_state))]
async fn summary(
    State(app_state): State<AppState>,
    caseworker: Caseworker,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<ApplicationSummary>, ApiError> {
    let summary = app_state.search.summary(query.id).await?;

    Ok(Json(summary))
}
