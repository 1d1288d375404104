use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ApplicationType, CaseworkerId, SubmissionStatus};
use crate::domain::ReviewError;

/// A part of an application the reviewer wants the applicant to change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlaggedSection {
    /// Task list section, e.g. `personal_details`.
    pub section: String,
    #[serde(default)]
    pub field: Option<String>,
    pub comment: String,
}

/// What a caseworker wants to do with an application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReviewAction {
    Assign,
    Release,
    Accept,
    Return {
        #[serde(default)]
        flagged_sections: Vec<FlaggedSection>,
    },
}

/// Review state of a stored application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub application_id: Uuid,
    pub application_type: ApplicationType,
    pub application_reference: Option<String>,
    pub status: SubmissionStatus,
    pub reviewer: Option<CaseworkerId>,
    pub applicant_email: Option<String>,
}

/// The change a review action makes to an application.
///
/// `previous_status` and `previous_reviewer` are what the action was decided
/// against. Stores only write the update while the application still has
/// them, and report [`ReviewError::Stale`] otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewUpdate {
    pub application_id: Uuid,
    pub status: SubmissionStatus,
    pub reviewer: Option<CaseworkerId>,
    pub flagged_sections: Vec<FlaggedSection>,
    pub previous_status: SubmissionStatus,
    pub previous_reviewer: Option<CaseworkerId>,
}

/// Result of a successful review action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewOutcome {
    pub application_id: Uuid,
    pub application_type: ApplicationType,
    #[serde(rename = "submission_type")]
    pub status: SubmissionStatus,
}

impl ReviewAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Assign => "assign",
            Self::Release => "release",
            Self::Accept => "accept",
            Self::Return { .. } => "return",
        }
    }

    /// Work out the update this action makes to `record` when performed by
    /// `caseworker`.
    ///
    /// Only a `SUBMITTED` application can be assigned. Every other action
    /// needs an application in `ARC_REVIEW` that is assigned to `caseworker`.
    pub fn apply(
        &self,
        record: &ReviewRecord,
        caseworker: &CaseworkerId,
    ) -> Result<ReviewUpdate, ReviewError> {
        let update = |status: SubmissionStatus, reviewer: Option<CaseworkerId>| ReviewUpdate {
            application_id: record.application_id,
            status,
            reviewer,
            flagged_sections: Vec::new(),
            previous_status: record.status.clone(),
            previous_reviewer: record.reviewer.clone(),
        };

        match self {
            Self::Assign => match record.status {
                SubmissionStatus::Submitted => {
                    Ok(update(SubmissionStatus::ArcReview, Some(caseworker.clone())))
                }
                _ => Err(self.invalid_from(&record.status)),
            },
            Self::Release => {
                self.ensure_reviewing(record, caseworker)?;
                Ok(update(SubmissionStatus::Submitted, None))
            }
            Self::Accept => {
                self.ensure_reviewing(record, caseworker)?;
                Ok(update(SubmissionStatus::Accepted, Some(caseworker.clone())))
            }
            Self::Return { flagged_sections } => {
                self.ensure_reviewing(record, caseworker)?;
                if flagged_sections.is_empty() {
                    return Err(ReviewError::NoFlaggedSections);
                }
                Ok(ReviewUpdate {
                    flagged_sections: flagged_sections.clone(),
                    ..update(SubmissionStatus::FurtherInformation, Some(caseworker.clone()))
                })
            }
        }
    }

    fn ensure_reviewing(
        &self,
        record: &ReviewRecord,
        caseworker: &CaseworkerId,
    ) -> Result<(), ReviewError> {
        if record.status != SubmissionStatus::ArcReview {
            return Err(self.invalid_from(&record.status));
        }
        if record.reviewer.as_ref() != Some(caseworker) {
            return Err(ReviewError::NotAssignee {
                reviewer: record.reviewer.clone(),
            });
        }
        Ok(())
    }

    fn invalid_from(&self, status: &SubmissionStatus) -> ReviewError {
        ReviewError::InvalidTransition {
            from: status.clone(),
            action: self.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: SubmissionStatus, reviewer: Option<&str>) -> ReviewRecord {
        ReviewRecord {
            application_id: Uuid::new_v4(),
            application_type: ApplicationType::Childminder,
            application_reference: Some("CM000001".to_string()),
            status,
            reviewer: reviewer.map(CaseworkerId::from),
            applicant_email: None,
        }
    }

    fn flagged() -> Vec<FlaggedSection> {
        vec![FlaggedSection {
            section: "personal_details".to_string(),
            field: Some("date_of_birth".to_string()),
            comment: "Does not match the DBS certificate".to_string(),
        }]
    }

    #[test]
    fn assign_takes_submitted_application() {
        let me = CaseworkerId::new("arc.one");
        let update = ReviewAction::Assign
            .apply(&record(SubmissionStatus::Submitted, None), &me)
            .unwrap();

        assert_eq!(update.status, SubmissionStatus::ArcReview);
        assert_eq!(update.reviewer, Some(me));
    }

    #[test]
    fn assign_rejects_application_already_in_review() {
        let err = ReviewAction::Assign
            .apply(
                &record(SubmissionStatus::ArcReview, Some("arc.two")),
                &CaseworkerId::new("arc.one"),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            ReviewError::InvalidTransition { action: "assign", from: SubmissionStatus::ArcReview }
        ));
    }

    #[test]
    fn release_clears_reviewer() {
        let update = ReviewAction::Release
            .apply(
                &record(SubmissionStatus::ArcReview, Some("arc.one")),
                &CaseworkerId::new("arc.one"),
            )
            .unwrap();

        assert_eq!(update.status, SubmissionStatus::Submitted);
        assert_eq!(update.reviewer, None);
        assert_eq!(update.previous_status, SubmissionStatus::ArcReview);
        assert_eq!(update.previous_reviewer, Some(CaseworkerId::new("arc.one")));
    }

    #[test]
    fn only_assignee_can_accept() {
        let err = ReviewAction::Accept
            .apply(
                &record(SubmissionStatus::ArcReview, Some("arc.one")),
                &CaseworkerId::new("arc.two"),
            )
            .unwrap_err();

        assert!(matches!(err, ReviewError::NotAssignee { reviewer: Some(ref r) } if r.as_str() == "arc.one"));
    }

    #[test]
    fn accept_requires_review_status() {
        let err = ReviewAction::Accept
            .apply(
                &record(SubmissionStatus::Drafting, None),
                &CaseworkerId::new("arc.one"),
            )
            .unwrap_err();

        assert!(matches!(err, ReviewError::InvalidTransition { action: "accept", .. }));
    }

    #[test]
    fn return_requires_flagged_sections() {
        let current = record(SubmissionStatus::ArcReview, Some("arc.one"));
        let me = CaseworkerId::new("arc.one");

        let err = ReviewAction::Return {
            flagged_sections: vec![],
        }
        .apply(&current, &me)
        .unwrap_err();
        assert!(matches!(err, ReviewError::NoFlaggedSections));

        let update = ReviewAction::Return {
            flagged_sections: flagged(),
        }
        .apply(&current, &me)
        .unwrap();
        assert_eq!(update.status, SubmissionStatus::FurtherInformation);
        assert_eq!(update.flagged_sections, flagged());
    }

    #[test]
    fn action_deserializes_from_tagged_json() {
        let action: ReviewAction = serde_json::from_str(
            r#"{"action": "return", "flagged_sections": [
                {"section": "personal_details", "comment": "Check name"}
            ]}"#,
        )
        .unwrap();
        assert!(matches!(action, ReviewAction::Return { ref flagged_sections } if flagged_sections.len() == 1));

        let action: ReviewAction = serde_json::from_str(r#"{"action": "assign"}"#).unwrap();
        assert_eq!(action, ReviewAction::Assign);
    }
}
