use thiserror::Error;
use uuid::Uuid;

use super::models::{CaseworkerId, SubmissionStatus};

/// Errors that can occur while moving an application through review.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("application not found: {0}")]
    NotFound(Uuid),
    #[error("cannot {action} an application in status {from}")]
    InvalidTransition {
        from: SubmissionStatus,
        action: &'static str,
    },
    #[error("application is assigned to {}", .reviewer.as_ref().map(CaseworkerId::as_str).unwrap_or("nobody"))]
    NotAssignee { reviewer: Option<CaseworkerId> },
    #[error("an application can only be returned with at least one flagged section")]
    NoFlaggedSections,
    #[error("application {0} was changed by someone else, reload and try again")]
    Stale(Uuid),
    #[error("{0}")]
    Store(String),
}

impl ReviewError {
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors from the outbound email service.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification request failed: {0}")]
    Transport(String),
    #[error("notification service rejected the email with status {0}")]
    Rejected(u16),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_transition_names_status_and_action() {
        let err = ReviewError::InvalidTransition {
            from: SubmissionStatus::Accepted,
            action: "assign",
        };
        assert_eq!(err.to_string(), "cannot assign an application in status ACCEPTED");
    }

    #[test]
    fn not_assignee_names_current_reviewer() {
        let err = ReviewError::NotAssignee {
            reviewer: Some(CaseworkerId::new("arc.reviewer")),
        };
        assert_eq!(err.to_string(), "application is assigned to arc.reviewer");

        let err = ReviewError::NotAssignee { reviewer: None };
        assert_eq!(err.to_string(), "application is assigned to nobody");
    }
}
