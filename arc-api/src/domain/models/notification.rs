use std::collections::BTreeMap;

use serde::Serialize;

/// A templated email to an applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailNotification {
    pub template_id: String,
    pub email_address: String,
    pub personalisation: BTreeMap<String, String>,
}
