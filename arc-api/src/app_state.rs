use std::sync::Arc;

use crate::domain::{
    ports::outbound::AuditLog, search::ApplicationSearch, services::ReviewService,
};

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<dyn ApplicationSearch>,
    pub review: Arc<ReviewService>,
    pub audit: Arc<dyn AuditLog>,
}

impl AppState {
    pub fn new(
        search: Arc<dyn ApplicationSearch>,
        review: ReviewService,
        audit: Arc<dyn AuditLog>,
    ) -> Self {
        Self {
            search,
            review: Arc::new(review),
            audit,
        }
    }
}
