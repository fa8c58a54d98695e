//! OAuth data model and wire types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user allowed to obtain tokens with the password grant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserAccount {
    pub user_id: String,
    pub full_name: String,
    pub password: String,
}

/// A client id and its secret.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientCredential {
    pub client_id: String,
    pub client_secret: String,
}

/// An issued token pair and the identities it was issued to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub access_token: String,
    pub user_id: String,
    pub client_id: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

impl TokenRecord {
    /// Check if the token is expired at `now`. The deadline itself is expired.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whole seconds left before expiry, rounded up; zero once expired.
    #[must_use]
    pub fn seconds_remaining(&self, now: DateTime<Utc>) -> u64 {
        let millis = (self.expires_at - now).num_milliseconds();
        if millis <= 0 {
            return 0;
        }
        (millis as u64).div_ceil(1000)
    }
}

/// Form submitted to the token endpoint.
///
/// Every field is optional so that a missing field surfaces as a form error
/// from the grant validator rather than as an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub grant_type: Option<String>,
}

/// Successful token endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
    pub token_type: &'static str,
    /// Always `null`; kept for wire compatibility.
    pub user_id: Option<String>,
    pub refresh_token: String,
}

/// Successful resource endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceResponse {
    pub access_token: String,
    pub client_id: String,
    pub user_id: String,
    pub full_name: String,
    pub expires: u64,
    pub refresh_token: String,
}
