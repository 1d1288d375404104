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
    domain::models::{ApplicationType, AuditEntry},
    routes::ApiError,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/auditlog", get(audit_log))
}

#[derive(Debug, Deserialize)]
struct AuditQuery {
    id: Uuid,
    app_type: ApplicationType,
}

#[instrument(name = "GET /arc/auditlog", skip(app_state))]
async fn audit_log(
    State(app_state): State<AppState>,
    caseworker: Caseworker,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Vec<AuditEntry>>, ApiError> {
    let entries = app_state.audit.entries(query.id, query.app_type).await?;

    Ok(Json(entries))
}
