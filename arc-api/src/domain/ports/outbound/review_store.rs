//! Review store port (outbound).
//!
//! Each application type keeps its review state in a different backend, so
//! the review service holds one store per type.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    models::{ReviewRecord, ReviewUpdate},
    ReviewError,
};

#[async_trait]
pub trait ReviewStore: Send + Sync + 'static {
    /// Current review state, `None` when the store has no such application.
    async fn load(&self, application_id: Uuid) -> Result<Option<ReviewRecord>, ReviewError>;

    /// Persist a status change together with any flagged sections.
    async fn save(&self, update: &ReviewUpdate) -> Result<(), ReviewError>;
}
