//! Applicant notification port (outbound).

use async_trait::async_trait;

use crate::domain::{models::EmailNotification, NotifyError};

#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    async fn send(&self, notification: &EmailNotification) -> Result<(), NotifyError>;
}
