//! Nanny review state held by the record gateway.

use async_trait::async_trait;
use record_gateway::{GatewayClient, GatewayParams};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::domain::{
    models::{ApplicationType, CaseworkerId, ReviewRecord, ReviewUpdate, SubmissionStatus},
    ports::outbound::ReviewStore,
    ReviewError,
};

const APPLICATION_RESOURCE: &str = "application";
const USER_RESOURCE: &str = "user";
const COMMENTS_RESOURCE: &str = "arc-comments";

#[derive(Debug, Deserialize)]
struct NannyApplication {
    application_id: Uuid,
    #[serde(default)]
    application_reference: Option<String>,
    application_status: SubmissionStatus,
    #[serde(default)]
    arc_reviewer: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NannyUser {
    #[serde(default)]
    email: Option<String>,
}

pub struct GatewayReviewStore {
    client: GatewayClient,
}

impl GatewayReviewStore {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    fn by_id(application_id: Uuid) -> GatewayParams {
        GatewayParams::new().with("application_id", application_id.to_string())
    }

    /// Applicant email from the gateway's user record. Missing or unreadable
    /// records just mean no email is sent.
    async fn applicant_email(&self, application_id: Uuid) -> Option<String> {
        match self
            .client
            .read::<NannyUser>(USER_RESOURCE, &Self::by_id(application_id))
            .await
        {
            Ok(response) => response.record.and_then(|user| user.email),
            Err(err) => {
                tracing::debug!(%application_id, "Could not read applicant email: {}", err);
                None
            }
        }
    }
}

fn gateway_failure(resource: &str, status_code: u16) -> ReviewError {
    ReviewError::store(format!(
        "record gateway returned status {} for '{}'",
        status_code, resource
    ))
}

#[async_trait]
impl ReviewStore for GatewayReviewStore {
    async fn load(&self, application_id: Uuid) -> Result<Option<ReviewRecord>, ReviewError> {
        let response = self
            .client
            .read::<NannyApplication>(APPLICATION_RESOURCE, &Self::by_id(application_id))
            .await
            .map_err(|err| ReviewError::store(err.to_string()))?;

        if response.status_code == 404 {
            return Ok(None);
        }
        let application = response
            .into_record()
            .map_err(|status_code| gateway_failure(APPLICATION_RESOURCE, status_code))?;

        Ok(Some(ReviewRecord {
            application_id: application.application_id,
            application_type: ApplicationType::Nanny,
            application_reference: application.application_reference,
            status: application.application_status,
            reviewer: application.arc_reviewer.map(CaseworkerId::from),
            applicant_email: self.applicant_email(application_id).await,
        }))
    }

    /// The gateway replaces whole records, so the current record is read back
    /// and only the review fields are changed before it is written. The write
    /// is skipped when the read-back review fields differ from the ones the
    /// update was decided against.
    async fn save(&self, update: &ReviewUpdate) -> Result<(), ReviewError> {
        let id = update.application_id;
        let mut application = self
            .client
            .read::<Map<String, Value>>(APPLICATION_RESOURCE, &Self::by_id(id))
            .await
            .map_err(|err| ReviewError::store(err.to_string()))?
            .into_record()
            .map_err(|status_code| match status_code {
                404 => ReviewError::NotFound(id),
                _ => gateway_failure(APPLICATION_RESOURCE, status_code),
            })?;

        let current_status = application.get("application_status").and_then(Value::as_str);
        let current_reviewer = application.get("arc_reviewer").and_then(Value::as_str);
        if current_status != Some(update.previous_status.as_code())
            || current_reviewer != update.previous_reviewer.as_ref().map(CaseworkerId::as_str)
        {
            return Err(ReviewError::Stale(id));
        }

        application.insert(
            "application_status".to_string(),
            Value::String(update.status.as_code().to_string()),
        );
        application.insert(
            "arc_reviewer".to_string(),
            update
                .reviewer
                .as_ref()
                .map_or(Value::Null, |r| Value::String(r.to_string())),
        );

        let resource = format!("{}/{}", APPLICATION_RESOURCE, id);
        let response = self
            .client
            .put(&resource, &application)
            .await
            .map_err(|err| ReviewError::store(err.to_string()))?;
        if !response.is_ok() {
            return Err(gateway_failure(&resource, response.status_code));
        }

        for section in &update.flagged_sections {
            let comment = json!({
                "application_id": id,
                "table_name": section.section,
                "field_name": section.field,
                "comment": section.comment,
                "flagged": true,
            });
            let response = self
                .client
                .create(COMMENTS_RESOURCE, &comment)
                .await
                .map_err(|err| ReviewError::store(err.to_string()))?;
            if response.record.is_none() {
                return Err(gateway_failure(COMMENTS_RESOURCE, response.status_code));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::FlaggedSection;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_for(server: &MockServer) -> GatewayReviewStore {
        let client =
            GatewayClient::new(format!("{}/api/v1", server.uri()), Duration::from_secs(5)).unwrap();
        GatewayReviewStore::new(client)
    }

    fn assign(id: Uuid) -> ReviewUpdate {
        ReviewUpdate {
            application_id: id,
            status: SubmissionStatus::ArcReview,
            reviewer: Some(CaseworkerId::new("arc.one")),
            flagged_sections: vec![],
            previous_status: SubmissionStatus::Submitted,
            previous_reviewer: None,
        }
    }

    async fn mount_application(
        server: &MockServer,
        id: Uuid,
        status: &str,
        reviewer: Option<&str>,
    ) {
        Mock::given(method("GET"))
            .and(path("/api/v1/application/"))
            .and(query_param("application_id", id.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "application_id": id,
                "application_reference": "NA000042",
                "application_status": status,
                "arc_reviewer": reviewer,
                "childcare_type": "home"
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn load_reads_application_and_email() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        mount_application(&server, id, "SUBMITTED", None).await;
        Mock::given(method("GET"))
            .and(path("/api/v1/user/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"email": "nanny@example.com"})),
            )
            .mount(&server)
            .await;

        let record = store_for(&server).load(id).await.unwrap().unwrap();

        assert_eq!(record.status, SubmissionStatus::Submitted);
        assert_eq!(record.application_type, ApplicationType::Nanny);
        assert_eq!(record.applicant_email.as_deref(), Some("nanny@example.com"));
    }

    #[tokio::test]
    async fn load_missing_application_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/application/"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        assert!(store_for(&server).load(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_keeps_other_fields_and_posts_comments() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        mount_application(&server, id, "ARC_REVIEW", Some("arc.one")).await;
        Mock::given(method("PUT"))
            .and(path(format!("/api/v1/application/{}/", id)))
            .and(body_partial_json(json!({
                "application_status": "FURTHER_INFORMATION",
                "arc_reviewer": "arc.one",
                "childcare_type": "home"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/v1/arc-comments/"))
            .and(body_partial_json(json!({"table_name": "references", "flagged": true})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let update = ReviewUpdate {
            application_id: id,
            status: SubmissionStatus::FurtherInformation,
            reviewer: Some(CaseworkerId::new("arc.one")),
            flagged_sections: vec![FlaggedSection {
                section: "references".to_string(),
                field: None,
                comment: "Second referee missing".to_string(),
            }],
            previous_status: SubmissionStatus::ArcReview,
            previous_reviewer: Some(CaseworkerId::new("arc.one")),
        };

        store_for(&server).save(&update).await.unwrap();
    }

    #[tokio::test]
    async fn rejected_put_is_store_error() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        mount_application(&server, id, "SUBMITTED", None).await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = store_for(&server).save(&assign(id)).await.unwrap_err();
        assert!(matches!(err, ReviewError::Store(ref msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn save_refuses_to_overwrite_a_changed_application() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        Mock::given(method("GET"))
            .and(path("/api/v1/application/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "application_id": id,
                "application_status": "ARC_REVIEW",
                "arc_reviewer": "arc.two"
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = store_for(&server).save(&assign(id)).await.unwrap_err();
        assert!(matches!(err, ReviewError::Stale(stale) if stale == id));
    }
}
