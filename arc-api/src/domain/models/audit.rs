use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{ApplicationType, CaseworkerId};

/// One line of an application's review history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    pub application_id: Uuid,
    pub application_type: ApplicationType,
    pub caseworker: CaseworkerId,
    pub action: String,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
}
