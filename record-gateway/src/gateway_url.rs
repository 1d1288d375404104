use crate::GatewayError;

#[derive(Debug, Clone)]
pub struct GatewayUrl(String);

impl AsRef<str> for GatewayUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl GatewayUrl {
    /// Creates a gateway URL from a base such as `http://nanny-gateway:8000/api/v1`.
    pub fn new(base: impl Into<String>) -> Result<Self, GatewayError> {
        let base = base.into();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(GatewayError::InvalidUrl(base));
        }

        Ok(Self(base))
    }

    /// Append the given path to the URL. Resource paths always end with a slash,
    /// which is what the gateway's routing expects.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_matches('/');
        Self(format!("{}/{}/", trimmed_url, trimmed_path))
    }
}
