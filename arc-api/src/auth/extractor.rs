use std::ops::Deref;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{domain::models::CaseworkerId, routes::ApiError};

/// Header carrying the authenticated caseworker's user name.
pub const CASEWORKER_HEADER: &str = "x-arc-user";

/// A custom Axum extractor for the caseworker making the request. Returns
/// 401 Unauthorized when the identity header is missing or blank.
#[derive(Debug, Clone)]
pub struct Caseworker(CaseworkerId);

impl Deref for Caseworker {
    type Target = CaseworkerId;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caseworker
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(CASEWORKER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

        Ok(Caseworker(CaseworkerId::new(id)))
    }
}
