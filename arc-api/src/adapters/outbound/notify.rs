//! Email notifications through the notification service HTTP API.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{models::EmailNotification, ports::outbound::Notifier, NotifyError};

#[derive(Debug, Clone)]
pub struct NotifyClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl NotifyClient {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!("{}/v2/notifications/email", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl Notifier for NotifyClient {
    async fn send(&self, notification: &EmailNotification) -> Result<(), NotifyError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(notification)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected(status.as_u16()));
        }

        tracing::debug!(template_id = %notification.template_id, "notification sent");
        Ok(())
    }
}
