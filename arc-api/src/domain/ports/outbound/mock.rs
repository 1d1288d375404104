//! In-memory outbound adapters for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use super::{AuditLog, Notifier, ReviewStore};
use crate::domain::{
    models::{ApplicationType, AuditEntry, EmailNotification, ReviewRecord, ReviewUpdate},
    AuditError, NotifyError, ReviewError,
};

/// Review store over a map of records. Saved updates are applied to the
/// record and kept for inspection.
#[derive(Clone, Default)]
pub struct MockReviewStore {
    records: Arc<RwLock<HashMap<Uuid, ReviewRecord>>>,
    saved: Arc<RwLock<Vec<ReviewUpdate>>>,
    /// Written over the stored record at the next `save`, as if another
    /// caseworker got there first.
    interleaved: Arc<RwLock<Option<ReviewRecord>>>,
}

#[allow(dead_code)]
impl MockReviewStore {
    pub fn with_record(self, record: ReviewRecord) -> Self {
        self.records
            .write()
            .unwrap()
            .insert(record.application_id, record);
        self
    }

    pub fn record(&self, application_id: Uuid) -> Option<ReviewRecord> {
        self.records.read().unwrap().get(&application_id).cloned()
    }

    pub fn saved(&self) -> Vec<ReviewUpdate> {
        self.saved.read().unwrap().clone()
    }

    pub fn changed_before_next_save(self, record: ReviewRecord) -> Self {
        *self.interleaved.write().unwrap() = Some(record);
        self
    }
}

#[async_trait]
impl ReviewStore for MockReviewStore {
    async fn load(&self, application_id: Uuid) -> Result<Option<ReviewRecord>, ReviewError> {
        Ok(self.record(application_id))
    }

    async fn save(&self, update: &ReviewUpdate) -> Result<(), ReviewError> {
        let mut records = self.records.write().unwrap();
        if let Some(other) = self.interleaved.write().unwrap().take() {
            records.insert(other.application_id, other);
        }
        let record = records
            .get_mut(&update.application_id)
            .ok_or(ReviewError::NotFound(update.application_id))?;
        if record.status != update.previous_status || record.reviewer != update.previous_reviewer {
            return Err(ReviewError::Stale(update.application_id));
        }
        record.status = update.status.clone();
        record.reviewer = update.reviewer.clone();
        self.saved.write().unwrap().push(update.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockAuditLog {
    entries: Arc<RwLock<Vec<AuditEntry>>>,
    fail: bool,
}

#[allow(dead_code)]
impl MockAuditLog {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl AuditLog for MockAuditLog {
    async fn record(&self, entry: &AuditEntry) -> Result<(), AuditError> {
        if self.fail {
            return Err(AuditError::Database(sqlx::Error::PoolTimedOut));
        }
        self.entries.write().unwrap().push(entry.clone());
        Ok(())
    }

    async fn entries(
        &self,
        application_id: Uuid,
        application_type: ApplicationType,
    ) -> Result<Vec<AuditEntry>, AuditError> {
        Ok(self
            .entries
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.application_id == application_id && e.application_type == application_type)
            .cloned()
            .collect())
    }
}

/// Notifier that records what it was asked to send, optionally failing.
#[derive(Clone, Default)]
pub struct MockNotifier {
    sent: Arc<RwLock<Vec<EmailNotification>>>,
    attempts: Arc<AtomicUsize>,
    fail: bool,
}

#[allow(dead_code)]
impl MockNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<EmailNotification> {
        self.sent.read().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, notification: &EmailNotification) -> Result<(), NotifyError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(NotifyError::Rejected(400));
        }
        self.sent.write().unwrap().push(notification.clone());
        Ok(())
    }
}
