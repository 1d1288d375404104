//! Childminder review state in the local database.
//!
//! Reads and writes `application`, takes the applicant's email from
//! `user_details` and stores flagged sections in `arc_comments`.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{
    models::{ApplicationType, CaseworkerId, ReviewRecord, ReviewUpdate, SubmissionStatus},
    ports::outbound::ReviewStore,
    ReviewError,
};

pub struct PostgresReviewStore {
    pool: PgPool,
}

impl PostgresReviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    application_id: Uuid,
    application_reference: Option<String>,
    application_status: String,
    arc_reviewer: Option<String>,
    applicant_email: Option<String>,
}

impl From<ReviewRow> for ReviewRecord {
    fn from(row: ReviewRow) -> Self {
        Self {
            application_id: row.application_id,
            application_type: ApplicationType::Childminder,
            application_reference: row.application_reference,
            status: SubmissionStatus::from(row.application_status),
            reviewer: row.arc_reviewer.map(CaseworkerId::from),
            applicant_email: row.applicant_email,
        }
    }
}

#[async_trait]
impl ReviewStore for PostgresReviewStore {
    async fn load(&self, application_id: Uuid) -> Result<Option<ReviewRecord>, ReviewError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            SELECT a.application_id, a.application_reference, a.application_status,
                   a.arc_reviewer, u.email AS applicant_email
            FROM application a
            LEFT JOIN user_details u ON u.application_id = a.application_id
            WHERE a.application_id = $1
            LIMIT 1
            "#,
        )
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| ReviewError::store(err.to_string()))?;

        Ok(row.map(ReviewRecord::from))
    }

    async fn save(&self, update: &ReviewUpdate) -> Result<(), ReviewError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|err| ReviewError::store(err.to_string()))?;

        let updated = sqlx::query(
            r#"
            UPDATE application
            SET application_status = $2,
                arc_reviewer = $3,
                date_accessed = now()
            WHERE application_id = $1
              AND application_status = $4
              AND arc_reviewer IS NOT DISTINCT FROM $5
            "#,
        )
        .bind(update.application_id)
        .bind(update.status.as_code())
        .bind(update.reviewer.as_ref().map(CaseworkerId::as_str))
        .bind(update.previous_status.as_code())
        .bind(update.previous_reviewer.as_ref().map(CaseworkerId::as_str))
        .execute(&mut *tx)
        .await
        .map_err(|err| ReviewError::store(err.to_string()))?;

        if updated.rows_affected() == 0 {
            let exists: bool = sqlx::query_scalar(
                "SELECT EXISTS (SELECT 1 FROM application WHERE application_id = $1)",
            )
            .bind(update.application_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|err| ReviewError::store(err.to_string()))?;

            return Err(if exists {
                ReviewError::Stale(update.application_id)
            } else {
                ReviewError::NotFound(update.application_id)
            });
        }

        for section in &update.flagged_sections {
            sqlx::query(
                r#"
                INSERT INTO arc_comments (application_id, table_name, field_name, comment, flagged)
                VALUES ($1, $2, $3, $4, TRUE)
                "#,
            )
            .bind(update.application_id)
            .bind(&section.section)
            .bind(section.field.as_deref())
            .bind(&section.comment)
            .execute(&mut *tx)
            .await
            .map_err(|err| ReviewError::store(err.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|err| ReviewError::store(err.to_string()))
    }
}
