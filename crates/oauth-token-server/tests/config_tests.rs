//! Configuration loading tests.

use std::io::Write;
use std::time::Duration;

use oauth_token_server::config::{Config, Credentials, defaults};
use oauth_token_server::error::ConfigError;
use oauth_token_server::oauth::CredentialStore;

#[test]
fn test_credentials_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "users": [{{"user_id": "alice", "full_name": "Alice A", "password": "pw"}}],
            "clients": [{{"client_id": "web", "client_secret": "s3cret"}}]
        }}"#
    )
    .unwrap();

    let creds = Credentials::from_json_file(file.path()).unwrap();
    let store = CredentialStore::new(&creds);

    assert!(store.verify_user("alice", "pw"));
    assert!(store.verify_client("web", "s3cret"));
    assert_eq!(store.full_name("alice"), Some("Alice A"));
    assert!(!store.verify_user("1406568753", "topnep123"));
}

#[test]
fn test_missing_credentials_file() {
    let err = Credentials::from_json_file("/nonexistent/credentials.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_malformed_credentials_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();

    let err = Credentials::from_json_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_new_sets_retention_to_twice_ttl() {
    let config = Config::new(Duration::from_secs(60));
    assert_eq!(config.store_retention, Duration::from_secs(120));
    assert_eq!(config.listen_addr.port(), defaults::PORT);
    assert!(config.validate().is_ok());
}

#[test]
fn test_zero_ttl_rejected() {
    let config = Config::new(Duration::ZERO);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_for_testing_uses_given_credentials() {
    let config = Config::for_testing(Credentials::seeded());
    assert_eq!(config.listen_addr.port(), 0);
    assert_eq!(config.token_ttl, defaults::TOKEN_TTL);
    assert!(config.validate().is_ok());
}
