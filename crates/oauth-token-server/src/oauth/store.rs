//! In-memory token store with logical and physical expiry.
//!
//! Records are evicted by the cache once the retention window has passed
//! (physical expiry). Independently, every read compares the record's
//! `expires_at` against the caller's clock (logical expiry), so an expired
//! record that has not been evicted yet is still reported as absent.
//!
//! The cache has no size bound. A valid token is never evicted early; the
//! number of records is bounded by the issuance rate times the retention
//! window.

use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;

use super::types::TokenRecord;

/// Concurrent token store keyed by access token.
#[derive(Clone)]
pub struct TokenStore {
    cache: Cache<String, TokenRecord>,
}

impl TokenStore {
    /// Create a store that physically retains records for `retention`.
    #[must_use]
    pub fn new(retention: Duration) -> Self {
        let cache = Cache::builder().time_to_live(retention).build();
        Self { cache }
    }

    /// Insert a record keyed by its access token.
    pub async fn insert(&self, record: TokenRecord) {
        self.cache.insert(record.access_token.clone(), record).await;
    }

    /// Look up a record that is still logically valid at `now`.
    pub async fn get_valid(&self, access_token: &str, now: DateTime<Utc>) -> Option<TokenRecord> {
        self.cache
            .get(access_token)
            .await
            .filter(|record| !record.is_expired_at(now))
    }

    /// Approximate number of physically stored records.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Run pending eviction and bookkeeping work.
    pub async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration as ChronoDuration;

    use super::*;

    fn record(token: &str, expires_at: DateTime<Utc>) -> TokenRecord {
        TokenRecord {
            access_token: token.into(),
            user_id: "user".into(),
            client_id: "client".into(),
            refresh_token: format!("{token}-refresh"),
            expires_at,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_valid() {
        let store = TokenStore::new(Duration::from_secs(600));
        let now = Utc::now();
        store.insert(record("abc", now + ChronoDuration::seconds(300))).await;

        let found = store.get_valid("abc", now).await;
        assert_eq!(found.map(|r| r.refresh_token), Some("abc-refresh".to_string()));
        assert!(store.get_valid("missing", now).await.is_none());
    }

    #[tokio::test]
    async fn test_logically_expired_record_is_absent() {
        let store = TokenStore::new(Duration::from_secs(600));
        let now = Utc::now();
        store.insert(record("abc", now + ChronoDuration::seconds(300))).await;

        let deadline = now + ChronoDuration::seconds(300);
        let just_before = deadline - ChronoDuration::milliseconds(1);
        assert!(store.get_valid("abc", just_before).await.is_some());
        assert!(store.get_valid("abc", deadline).await.is_none());

        // Still physically present until the retention window passes.
        store.run_pending_tasks().await;
        assert_eq!(store.entry_count(), 1);
    }

    #[tokio::test]
    async fn test_physical_eviction_after_retention() {
        let store = TokenStore::new(Duration::from_millis(50));
        let now = Utc::now();
        store.insert(record("abc", now + ChronoDuration::seconds(300))).await;

        tokio::time::sleep(Duration::from_millis(120)).await;
        store.run_pending_tasks().await;

        assert!(store.get_valid("abc", now).await.is_none());
        assert_eq!(store.entry_count(), 0);
    }

    #[tokio::test]
    async fn test_valid_records_survive_many_insertions() {
        let store = TokenStore::new(Duration::from_secs(600));
        let now = Utc::now();
        let tokens: Vec<String> = (0..500).map(|i| format!("token-{i}")).collect();

        for token in &tokens {
            store.insert(record(token, now + ChronoDuration::seconds(300))).await;
            store.run_pending_tasks().await;
        }

        for token in &tokens {
            assert!(store.get_valid(token, now).await.is_some(), "{token} was dropped");
        }
        assert_eq!(store.entry_count(), 500);
    }
}
