//! Composition root: the only place that imports concrete outbound adapters.

use std::sync::Arc;

use record_gateway::{GatewayClient, GatewayError};
use sqlx::PgPool;

use crate::{
    adapters::outbound::{
        gateway::GatewayReviewStore,
        notify::NotifyClient,
        postgres::{PostgresAuditLog, PostgresReviewStore},
    },
    app_state::AppState,
    config::Settings,
    domain::{
        search::{
            repository::PgChildminderRepository, source::GatewayNannySource, SearchService,
        },
        services::ReviewService,
        NotifyError,
    },
};

#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    #[error("record gateway client: {0}")]
    Gateway(#[from] GatewayError),
    #[error("notification client: {0}")]
    Notify(#[from] NotifyError),
}

/// Wire every service against Postgres, the record gateway and, when
/// configured, the notification service.
pub fn build_state(pool: PgPool, settings: &Settings) -> Result<AppState, FactoryError> {
    let gateway = GatewayClient::new(&settings.gateway.base_url, settings.gateway.timeout())?;

    let search = SearchService::new(
        PgChildminderRepository::new(pool.clone()),
        GatewayNannySource::new(gateway.clone()),
    );

    let audit = Arc::new(PostgresAuditLog::new(pool.clone()));
    let mut review = ReviewService::new(
        Arc::new(PostgresReviewStore::new(pool)),
        Arc::new(GatewayReviewStore::new(gateway)),
        audit.clone(),
    );

    match &settings.notify {
        Some(notify) => {
            let client = NotifyClient::new(&notify.base_url, &notify.api_key, notify.timeout())?;
            review = review.with_notifications(Arc::new(client), notify.templates());
        }
        None => tracing::info!("No notify settings, applicant emails are disabled"),
    }

    Ok(AppState::new(Arc::new(search), review, audit))
}
