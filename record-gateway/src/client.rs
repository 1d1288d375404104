use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::{GatewayParams, GatewayUrl};

/// HTTP client for the record gateway.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    base_url: GatewayUrl,
    http: reqwest::Client,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: GatewayUrl::new(base_url)?,
            http,
        })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &GatewayParams,
    ) -> Result<GatewayResponse<T>, GatewayError> {
        let url = self.base_url.append_path(resource);

        let resp = self
            .http
            .get(url.as_ref())
            .query(params.as_map())
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status_code = resp.status().as_u16();
        tracing::debug!(resource, status_code, "record gateway responded");

        if status_code != 200 {
            return Ok(GatewayResponse::status_only(status_code));
        }

        let record = resp.json::<T>().await.map_err(|e| {
            GatewayError::Parsing(format!(
                "Failed to parse '{}' response as JSON: {}",
                resource, e
            ))
        })?;

        Ok(GatewayResponse {
            status_code,
            record: Some(record),
        })
    }

    /// List every record of `resource` matching `params`.
    pub async fn list<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &GatewayParams,
    ) -> Result<GatewayResponse<Vec<T>>, GatewayError> {
        self.fetch(resource, params).await
    }

    /// Fetch the single record of `resource` identified by `params`.
    pub async fn read<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &GatewayParams,
    ) -> Result<GatewayResponse<T>, GatewayError> {
        self.fetch(resource, params).await
    }

    /// Replace the record at `resource` with `body`.
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        resource: &str,
        body: &B,
    ) -> Result<GatewayResponse<()>, GatewayError> {
        let url = self.base_url.append_path(resource);

        let resp = self
            .http
            .put(url.as_ref())
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status_code = resp.status().as_u16();
        tracing::debug!(resource, status_code, "record gateway accepted update");

        Ok(GatewayResponse {
            status_code,
            record: (status_code == 200).then_some(()),
        })
    }

    /// Create a new record under `resource`. The gateway answers 201 on success.
    pub async fn create<B: Serialize + ?Sized>(
        &self,
        resource: &str,
        body: &B,
    ) -> Result<GatewayResponse<()>, GatewayError> {
        let url = self.base_url.append_path(resource);

        let resp = self
            .http
            .post(url.as_ref())
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status_code = resp.status().as_u16();
        tracing::debug!(resource, status_code, "record gateway created record");

        Ok(GatewayResponse {
            status_code,
            record: resp.status().is_success().then_some(()),
        })
    }
}

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("TransportError: {0}")]
    Transport(String),
    #[error("ParsingError: {0}")]
    Parsing(String),
    #[error("InvalidUrl: '{0}' is not an http(s) URL")]
    InvalidUrl(String),
}

/// Envelope returned by every gateway call: the HTTP status and, when the
/// status is 200, the decoded record.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse<T> {
    pub status_code: u16,
    pub record: Option<T>,
}

impl<T> GatewayResponse<T> {
    fn status_only(status_code: u16) -> Self {
        Self {
            status_code,
            record: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }

    /// The record of a successful response, or the status code otherwise.
    pub fn into_record(self) -> Result<T, u16> {
        match self.record {
            Some(record) if self.status_code == 200 => Ok(record),
            _ => Err(self.status_code),
        }
    }
}
