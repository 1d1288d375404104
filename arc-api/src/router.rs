use axum::{routing::get, Router};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use crate::{app_state::AppState, routes};

pub fn create(app_state: AppState) -> Router<()> {
    let arc = Router::new()
        .merge(routes::search::router())
        .merge(routes::audit::router())
        .merge(routes::review::router());

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/arc", arc)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
