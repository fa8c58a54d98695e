//! Token minting.

use std::time::Duration;

use chrono::{DateTime, Utc};

use super::store::TokenStore;
use super::types::TokenRecord;

/// Bytes of entropy per token; rendered as twice as many hex characters.
pub const TOKEN_BYTES: usize = 18;

/// Issues token pairs and records them in the [`TokenStore`].
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    store: TokenStore,
    ttl: Duration,
}

impl TokenIssuer {
    #[must_use]
    pub const fn new(store: TokenStore, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Generate an opaque token from the thread-local CSPRNG.
    ///
    /// Panics if the operating system entropy source fails.
    #[must_use]
    pub fn generate_token() -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes);
        hex::encode(bytes)
    }

    /// Issue a token pair for an already verified user and client.
    pub async fn issue(&self, user_id: &str, client_id: &str) -> TokenRecord {
        self.issue_at(user_id, client_id, Utc::now()).await
    }

    /// Issue a token pair as of `now`.
    pub async fn issue_at(
        &self,
        user_id: &str,
        client_id: &str,
        now: DateTime<Utc>,
    ) -> TokenRecord {
        let record = TokenRecord {
            access_token: Self::generate_token(),
            user_id: user_id.to_owned(),
            client_id: client_id.to_owned(),
            refresh_token: Self::generate_token(),
            expires_at: now + self.ttl,
        };

        self.store.insert(record.clone()).await;
        tracing::info!(user_id = %user_id, client_id = %client_id, "Issued token pair");

        record
    }

    /// Logical token lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }
}
