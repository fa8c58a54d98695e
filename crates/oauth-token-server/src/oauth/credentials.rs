//! Static user and client credential lookups.

use std::collections::HashMap;

use crate::config::Credentials;

use super::types::UserAccount;

/// Read-only credential store built once at startup.
#[derive(Clone, Default)]
pub struct CredentialStore {
    users: HashMap<String, UserAccount>,
    clients: HashMap<String, String>,
}

impl CredentialStore {
    /// Build the store from configured credentials. Later duplicates win.
    #[must_use]
    pub fn new(credentials: &Credentials) -> Self {
        let users = credentials
            .users
            .iter()
            .map(|u| (u.user_id.clone(), u.clone()))
            .collect();
        let clients = credentials
            .clients
            .iter()
            .map(|c| (c.client_id.clone(), c.client_secret.clone()))
            .collect();
        Self { users, clients }
    }

    /// True only if the user exists and the password matches.
    #[must_use]
    pub fn verify_user(&self, user_id: &str, password: &str) -> bool {
        self.users.get(user_id).is_some_and(|u| u.password == password)
    }

    /// True only if the client exists and the secret matches.
    #[must_use]
    pub fn verify_client(&self, client_id: &str, secret: &str) -> bool {
        self.clients.get(client_id).is_some_and(|s| s == secret)
    }

    /// Display name of a user, if known.
    #[must_use]
    pub fn full_name(&self, user_id: &str) -> Option<&str> {
        self.users.get(user_id).map(|u| u.full_name.as_str())
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("users", &self.users.len())
            .field("clients", &self.clients.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_user() {
        let store = CredentialStore::new(&Credentials::seeded());
        assert!(store.verify_user("1406568753", "topnep123"));
        assert!(!store.verify_user("1406568753", "wrong"));
        assert!(!store.verify_user("unknown", "topnep123"));
        assert_eq!(store.full_name("1406568753"), Some("Adityawarman Fanaro"));
        assert_eq!(store.full_name("unknown"), None);
    }

    #[test]
    fn test_seeded_client() {
        let store = CredentialStore::new(&Credentials::seeded());
        assert!(store.verify_client("11a1", "12919a"));
        assert!(!store.verify_client("11a1", "wrong"));
        assert!(!store.verify_client("other", "12919a"));
    }

    #[test]
    fn test_empty_store_fails_closed() {
        let store = CredentialStore::default();
        assert!(!store.verify_user("", ""));
        assert!(!store.verify_client("", ""));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let store = CredentialStore::new(&Credentials::seeded());
        let debug = format!("{store:?}");
        assert!(!debug.contains("topnep123"));
        assert!(!debug.contains("12919a"));
    }
}
