use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::Caseworker,
    domain::models::{ApplicationType, ReviewAction, ReviewOutcome},
    routes::ApiError,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/applications/:app_type/:id/review", post(review))
}

#[instrument(name = "POST /arc/applications/review", skip(app_state, action))]
async fn review(
    State(app_state): State<AppState>,
    caseworker: Caseworker,
    Path((app_type, id)): Path<(ApplicationType, Uuid)>,
    Json(action): Json<ReviewAction>,
) -> Result<Json<ReviewOutcome>, ApiError> {
    let outcome = app_state
        .review
        .review(app_type, id, &caseworker, &action)
        .await?;

    Ok(Json(outcome))
}
