use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::{
    models::{ApplicationType, AuditEntry, CaseworkerId},
    ports::outbound::AuditLog,
    AuditError,
};

/// Audit log stored in the `arc_audit_log` table.
pub struct PostgresAuditLog {
    pool: PgPool,
}

impl PostgresAuditLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AuditRow {
    application_id: Uuid,
    caseworker: String,
    action: String,
    message: String,
    recorded_at: OffsetDateTime,
}

#[async_trait]
impl AuditLog for PostgresAuditLog {
    async fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        sqlx::query(
            r#"
            INSERT INTO arc_audit_log
                (application_id, application_type, caseworker, action, message, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.application_id)
        .bind(entry.application_type.to_string())
        .bind(entry.caseworker.as_str())
        .bind(&entry.action)
        .bind(&entry.message)
        .bind(entry.recorded_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn entries(
        &self,
        application_id: Uuid,
        application_type: ApplicationType,
    ) -> Result<Vec<AuditEntry>, AuditError> {
        let rows = sqlx::query_as::<_, AuditRow>(
            r#"
            SELECT application_id, caseworker, action, message, recorded_at
            FROM arc_audit_log
            WHERE application_id = $1 AND application_type = $2
            ORDER BY recorded_at, id
            "#,
        )
        .bind(application_id)
        .bind(application_type.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| AuditEntry {
                application_id: row.application_id,
                application_type,
                caseworker: CaseworkerId::from(row.caseworker),
                action: row.action,
                message: row.message,
                recorded_at: row.recorded_at,
            })
            .collect())
    }
}
