//! Audit log port (outbound).

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    models::{ApplicationType, AuditEntry},
    AuditError,
};

#[async_trait]
pub trait AuditLog: Send + Sync + 'static {
    async fn record(&self, entry: &AuditEntry) -> Result<(), AuditError>;

    /// Every entry for an application, oldest first.
    async fn entries(
        &self,
        application_id: Uuid,
        application_type: ApplicationType,
    ) -> Result<Vec<AuditEntry>, AuditError>;
}
