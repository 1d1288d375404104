use std::collections::BTreeMap;

/// Query parameters for a gateway call.
///
/// Only filters with a value are sent: inserting an empty or whitespace-only
/// value leaves the parameter out entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayParams(BTreeMap<String, String>);

impl GatewayParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl AsRef<str>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl AsRef<str>) {
        let value = value.as_ref().trim();
        if !value.is_empty() {
            self.0.insert(key.into(), value.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}
