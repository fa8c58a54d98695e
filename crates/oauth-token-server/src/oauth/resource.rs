//! Bearer token validation for the resource endpoint.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::credentials::CredentialStore;
use super::store::TokenStore;
use super::types::ResourceResponse;
use crate::error::{AuthError, AuthResult};

/// Extract the token from an `Authorization` header value.
///
/// The scheme must be `Bearer` (any case) and the token is the second
/// whitespace-delimited segment.
#[must_use]
pub fn parse_bearer(header: &str) -> Option<&str> {
    let mut parts = header.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    scheme.eq_ignore_ascii_case("bearer").then_some(token)
}

/// Validates presented access tokens against the [`TokenStore`].
#[derive(Debug, Clone)]
pub struct ResourceAuthorizer {
    store: TokenStore,
    credentials: Arc<CredentialStore>,
}

impl ResourceAuthorizer {
    #[must_use]
    pub const fn new(store: TokenStore, credentials: Arc<CredentialStore>) -> Self {
        Self { store, credentials }
    }

    /// Authorize a request carrying the given `Authorization` header, if any.
    pub async fn authorize(&self, header: Option<&str>) -> AuthResult<ResourceResponse> {
        self.authorize_at(header, Utc::now()).await
    }

    /// Authorize as of `now`.
    pub async fn authorize_at(
        &self,
        header: Option<&str>,
        now: DateTime<Utc>,
    ) -> AuthResult<ResourceResponse> {
        let token = header.and_then(parse_bearer).ok_or(AuthError::Token)?;
        let record = self.store.get_valid(token, now).await.ok_or(AuthError::Token)?;

        let full_name = self
            .credentials
            .full_name(&record.user_id)
            .ok_or_else(|| AuthError::consistency(&record.user_id))?
            .to_owned();

        Ok(ResourceResponse {
            expires: record.seconds_remaining(now),
            access_token: record.access_token,
            client_id: record.client_id,
            user_id: record.user_id,
            full_name,
            refresh_token: record.refresh_token,
        })
    }
}
