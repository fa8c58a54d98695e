//! Password grant validation.
//!
//! A request moves through [`GrantStage`]s in a fixed order and stops at the
//! first failure. Nothing is written before [`GrantStage::Issuing`], and the
//! user and client checks fail with the same [`AuthError::Credentials`] so the
//! caller cannot tell which one rejected the request.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::credentials::CredentialStore;
use super::issuer::TokenIssuer;
use super::types::{TokenRecord, TokenRequest, TokenResponse};
use crate::error::{AuthError, AuthResult};

/// The only grant type accepted by the token endpoint.
pub const PASSWORD_GRANT: &str = "password";

/// Stages of a token request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantStage {
    ParsingForm,
    CheckingUser,
    CheckingClient,
    Issuing,
    Done,
}

impl fmt::Display for GrantStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ParsingForm => "parsing_form",
            Self::CheckingUser => "checking_user",
            Self::CheckingClient => "checking_client",
            Self::Issuing => "issuing",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// A token request with every required field present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordGrant {
    pub username: String,
    pub password: String,
    pub client_id: String,
    pub client_secret: String,
    pub grant_type: String,
}

impl TryFrom<TokenRequest> for PasswordGrant {
    type Error = AuthError;

    fn try_from(req: TokenRequest) -> AuthResult<Self> {
        fn required(value: Option<String>, field: &str) -> AuthResult<String> {
            value.ok_or_else(|| AuthError::form(format!("missing field `{field}`")))
        }

        Ok(Self {
            username: required(req.username, "username")?,
            password: required(req.password, "password")?,
            client_id: required(req.client_id, "client_id")?,
            client_secret: required(req.client_secret, "client_secret")?,
            grant_type: required(req.grant_type, "grant_type")?,
        })
    }
}

/// Validates password grants and delegates issuance to the [`TokenIssuer`].
#[derive(Debug, Clone)]
pub struct GrantValidator {
    credentials: Arc<CredentialStore>,
    issuer: TokenIssuer,
}

impl GrantValidator {
    #[must_use]
    pub const fn new(credentials: Arc<CredentialStore>, issuer: TokenIssuer) -> Self {
        Self { credentials, issuer }
    }

    /// Run a token request through every stage.
    pub async fn grant(&self, req: TokenRequest) -> AuthResult<TokenResponse> {
        self.grant_at(req, Utc::now()).await
    }

    /// Run a token request as of `now`.
    pub async fn grant_at(
        &self,
        req: TokenRequest,
        now: DateTime<Utc>,
    ) -> AuthResult<TokenResponse> {
        let grant =
            PasswordGrant::try_from(req).map_err(|e| reject(GrantStage::ParsingForm, e))?;
        let record = self.validate_and_issue(&grant, now).await?;

        tracing::debug!(
            stage = %GrantStage::Done,
            client_id = %record.client_id,
            "Grant completed"
        );

        Ok(TokenResponse {
            access_token: record.access_token,
            expires_in: self.issuer.ttl().as_secs(),
            token_type: "Bearer",
            user_id: None,
            refresh_token: record.refresh_token,
        })
    }

    async fn validate_and_issue(
        &self,
        grant: &PasswordGrant,
        now: DateTime<Utc>,
    ) -> AuthResult<TokenRecord> {
        if !self.credentials.verify_user(&grant.username, &grant.password) {
            return Err(reject(GrantStage::CheckingUser, AuthError::Credentials));
        }

        let client_ok = self
            .credentials
            .verify_client(&grant.client_id, &grant.client_secret);
        if !client_ok || grant.grant_type != PASSWORD_GRANT {
            return Err(reject(GrantStage::CheckingClient, AuthError::Credentials));
        }

        tracing::debug!(
            stage = %GrantStage::Issuing,
            client_id = %grant.client_id,
            "Credentials accepted"
        );
        Ok(self
            .issuer
            .issue_at(&grant.username, &grant.client_id, now)
            .await)
    }
}

/// Log a rejection at `stage` and hand the error back.
pub(crate) fn reject(stage: GrantStage, err: AuthError) -> AuthError {
    tracing::debug!(stage = %stage, error = %err, "Grant rejected");
    err
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::config::Credentials;
    use crate::oauth::store::TokenStore;

    fn validator() -> (GrantValidator, TokenStore) {
        let store = TokenStore::new(Duration::from_secs(600));
        let issuer = TokenIssuer::new(store.clone(), Duration::from_secs(300));
        let creds = Arc::new(CredentialStore::new(&Credentials::seeded()));
        (GrantValidator::new(creds, issuer), store)
    }

    fn valid_request() -> TokenRequest {
        TokenRequest {
            username: Some("1406568753".into()),
            password: Some("topnep123".into()),
            client_id: Some("11a1".into()),
            client_secret: Some("12919a".into()),
            grant_type: Some("password".into()),
        }
    }

    #[tokio::test]
    async fn test_valid_grant() {
        let (validator, store) = validator();
        let resp = validator.grant(valid_request()).await.unwrap();

        assert_eq!(resp.token_type, "Bearer");
        assert_eq!(resp.expires_in, 300);
        assert!(resp.user_id.is_none());
        assert!(store.get_valid(&resp.access_token, Utc::now()).await.is_some());
    }

    #[tokio::test]
    async fn test_missing_field_is_form_error() {
        let (validator, _) = validator();
        let req = TokenRequest { grant_type: None, ..valid_request() };
        let err = validator.grant(req).await.unwrap_err();
        assert!(matches!(err, AuthError::Form(_)));
    }

    #[tokio::test]
    async fn test_failures_are_indistinguishable() {
        let (validator, store) = validator();
        let cases = [
            TokenRequest { password: Some("nope".into()), ..valid_request() },
            TokenRequest { username: Some("nobody".into()), ..valid_request() },
            TokenRequest { client_secret: Some("nope".into()), ..valid_request() },
            TokenRequest { client_id: Some("nobody".into()), ..valid_request() },
            TokenRequest {
                grant_type: Some("client_credentials".into()),
                ..valid_request()
            },
        ];

        for req in cases {
            assert_eq!(validator.grant(req).await.unwrap_err(), AuthError::Credentials);
        }

        store.run_pending_tasks().await;
        assert_eq!(store.entry_count(), 0, "rejected grants must not issue tokens");
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(GrantStage::CheckingClient.to_string(), "checking_client");
    }
}
