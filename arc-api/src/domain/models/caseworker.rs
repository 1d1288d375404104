use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of the caseworker making a request, as supplied by the
/// authentication layer in front of this service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseworkerId(String);

impl CaseworkerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseworkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CaseworkerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for CaseworkerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for CaseworkerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
