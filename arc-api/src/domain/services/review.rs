use std::{collections::BTreeMap, sync::Arc};

use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::{
    models::{
        ApplicationType, AuditEntry, CaseworkerId, EmailNotification, ReviewAction, ReviewOutcome,
        ReviewRecord, ReviewUpdate,
    },
    ports::outbound::{AuditLog, Notifier, ReviewStore},
    ReviewError,
};

/// Email templates used for applicant notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationTemplates {
    pub accepted: String,
    pub returned: String,
}

struct Notifications {
    notifier: Arc<dyn Notifier>,
    templates: NotificationTemplates,
}

/// Moves applications through caseworker review.
///
/// Review state lives in a different backend per application type. Every
/// successful action is written to the audit log. Applicants are emailed on
/// accept and return when notifications are configured. A failed email or
/// audit write is logged and does not undo the action.
pub struct ReviewService {
    childminders: Arc<dyn ReviewStore>,
    nannies: Arc<dyn ReviewStore>,
    audit: Arc<dyn AuditLog>,
    notifications: Option<Notifications>,
}

impl ReviewService {
    pub fn new(
        childminders: Arc<dyn ReviewStore>,
        nannies: Arc<dyn ReviewStore>,
        audit: Arc<dyn AuditLog>,
    ) -> Self {
        Self {
            childminders,
            nannies,
            audit,
            notifications: None,
        }
    }

    pub fn with_notifications(
        mut self,
        notifier: Arc<dyn Notifier>,
        templates: NotificationTemplates,
    ) -> Self {
        self.notifications = Some(Notifications {
            notifier,
            templates,
        });
        self
    }

    fn store(&self, application_type: ApplicationType) -> &dyn ReviewStore {
        match application_type {
            ApplicationType::Childminder => self.childminders.as_ref(),
            ApplicationType::Nanny => self.nannies.as_ref(),
        }
    }

    #[tracing::instrument(skip(self, action), fields(action = action.name()))]
    pub async fn review(
        &self,
        application_type: ApplicationType,
        application_id: Uuid,
        caseworker: &CaseworkerId,
        action: &ReviewAction,
    ) -> Result<ReviewOutcome, ReviewError> {
        let store = self.store(application_type);
        let record = store
            .load(application_id)
            .await?
            .ok_or(ReviewError::NotFound(application_id))?;

        let update = action.apply(&record, caseworker)?;
        match store.save(&update).await {
            Err(ReviewError::Stale(_)) => {
                return Err(self.stale_reason(store, action, application_id, caseworker).await)
            }
            result => result?,
        }

        // The status change is already committed, so a lost audit entry is
        // logged rather than reported as a failed action.
        let entry = AuditEntry {
            application_id,
            application_type,
            caseworker: caseworker.clone(),
            action: action.name().to_string(),
            message: audit_message(action, caseworker, &update),
            recorded_at: OffsetDateTime::now_utc(),
        };
        if let Err(err) = self.audit.record(&entry).await {
            tracing::warn!(
                %application_id,
                audit_message = %entry.message,
                "Failed to write audit entry: {}",
                err
            );
        }

        tracing::info!(from = %record.status, to = %update.status, "application reviewed");
        self.notify(&record, action).await;

        Ok(ReviewOutcome {
            application_id,
            application_type,
            status: update.status,
        })
    }

    /// Why `action` no longer applies after the application changed under it.
    async fn stale_reason(
        &self,
        store: &dyn ReviewStore,
        action: &ReviewAction,
        application_id: Uuid,
        caseworker: &CaseworkerId,
    ) -> ReviewError {
        match store.load(application_id).await {
            Ok(Some(current)) => match action.apply(&current, caseworker) {
                Err(err) => err,
                Ok(_) => ReviewError::Stale(application_id),
            },
            Ok(None) => ReviewError::NotFound(application_id),
            Err(err) => err,
        }
    }

    async fn notify(&self, record: &ReviewRecord, action: &ReviewAction) {
        let Some(notifications) = &self.notifications else {
            return;
        };
        let Some(notification) = notification_for(&notifications.templates, record, action) else {
            return;
        };

        if let Err(err) = notifications.notifier.send(&notification).await {
            tracing::warn!(
                application_id = %record.application_id,
                "Failed to notify applicant: {}",
                err
            );
        }
    }
}

fn audit_message(action: &ReviewAction, caseworker: &CaseworkerId, update: &ReviewUpdate) -> String {
    match action {
        ReviewAction::Assign => format!("Assigned to {}", caseworker),
        ReviewAction::Release => format!("Released by {}", caseworker),
        ReviewAction::Accept => format!("Accepted by {}", caseworker),
        ReviewAction::Return { .. } => format!(
            "Returned by {} with flagged sections: {}",
            caseworker,
            section_list(update)
        ),
    }
}

fn section_list(update: &ReviewUpdate) -> String {
    update
        .flagged_sections
        .iter()
        .map(|s| s.section.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Email for the applicant after `action`, `None` when the action sends no
/// email or the applicant has no known address.
fn notification_for(
    templates: &NotificationTemplates,
    record: &ReviewRecord,
    action: &ReviewAction,
) -> Option<EmailNotification> {
    let template_id = match action {
        ReviewAction::Accept => &templates.accepted,
        ReviewAction::Return { .. } => &templates.returned,
        ReviewAction::Assign | ReviewAction::Release => return None,
    };

    let Some(email_address) = record.applicant_email.clone() else {
        tracing::debug!(application_id = %record.application_id, "No applicant email, skipping notification");
        return None;
    };

    let mut personalisation = BTreeMap::new();
    personalisation.insert(
        "ref".to_string(),
        record.application_reference.clone().unwrap_or_default(),
    );

    Some(EmailNotification {
        template_id: template_id.clone(),
        email_address,
        personalisation,
    })
}
