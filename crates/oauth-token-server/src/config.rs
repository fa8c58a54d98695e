//! Configuration for the token server.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};
use crate::oauth::types::{ClientCredential, UserAccount};

/// Default server constants.
pub mod defaults {
    use std::time::Duration;

    /// Listen port.
    pub const PORT: u16 = 20604;

    /// Logical lifetime of an access token.
    pub const TOKEN_TTL: Duration = Duration::from_secs(300);

    /// Physical retention of token records; twice the logical lifetime.
    pub const STORE_RETENTION: Duration = Duration::from_secs(600);

    /// Longest accepted token lifetime.
    pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

    /// Longest accepted physical retention.
    pub const MAX_STORE_RETENTION: Duration = Duration::from_secs(2 * 24 * 60 * 60);

    /// Seeded user account.
    pub const SEED_USER_ID: &str = "1406568753";
    pub const SEED_USER_PASSWORD: &str = "topnep123";
    pub const SEED_USER_FULL_NAME: &str = "Adityawarman Fanaro";

    /// Seeded client credential.
    pub const SEED_CLIENT_ID: &str = "11a1";
    pub const SEED_CLIENT_SECRET: &str = "12919a";
}

/// Static user and client identities known to the server.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub users: Vec<UserAccount>,
    #[serde(default)]
    pub clients: Vec<ClientCredential>,
}

impl Credentials {
    /// The single seeded user and client the server ships with.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            users: vec![UserAccount {
                user_id: defaults::SEED_USER_ID.to_string(),
                full_name: defaults::SEED_USER_FULL_NAME.to_string(),
                password: defaults::SEED_USER_PASSWORD.to_string(),
            }],
            clients: vec![ClientCredential {
                client_id: defaults::SEED_CLIENT_ID.to_string(),
                client_secret: defaults::SEED_CLIENT_SECRET.to_string(),
            }],
        }
    }

    /// Load credentials from a JSON file of the form:
    ///
    /// ```json
    /// {"users": [{"user_id", "full_name", "password"}],
    ///  "clients": [{"client_id", "client_secret"}]}
    /// ```
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub listen_addr: SocketAddr,

    /// Logical token lifetime, reported as `expires_in`.
    pub token_ttl: Duration,

    /// How long the store keeps records before evicting them.
    pub store_retention: Duration,

    /// Whether `GET /oauth/resource` is routed.
    pub enable_resource_route: bool,

    /// Users and clients accepted by the token endpoint.
    pub credentials: Credentials,
}

impl Config {
    /// Create a configuration with the given token lifetime and seeded credentials.
    ///
    /// Store retention is set to twice the lifetime, saturating on overflow so
    /// that [`Config::validate`] can reject it.
    #[must_use]
    pub fn new(token_ttl: Duration) -> Self {
        Self {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), defaults::PORT),
            token_ttl,
            store_retention: token_ttl.checked_mul(2).unwrap_or(Duration::MAX),
            enable_resource_route: true,
            credentials: Credentials::seeded(),
        }
    }

    /// Create a test configuration with the given credentials bound to an ephemeral port.
    #[must_use]
    pub fn for_testing(credentials: Credentials) -> Self {
        Self {
            listen_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0),
            credentials,
            ..Self::default()
        }
    }

    /// Check that the configuration can serve traffic.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.token_ttl.is_zero() {
            return Err(ConfigError::invalid("token TTL must be positive"));
        }
        if self.token_ttl > defaults::MAX_TOKEN_TTL {
            return Err(ConfigError::invalid(format!(
                "token TTL {:?} exceeds the maximum of {:?}",
                self.token_ttl,
                defaults::MAX_TOKEN_TTL
            )));
        }
        if self.store_retention < self.token_ttl {
            return Err(ConfigError::invalid(format!(
                "store retention {:?} is shorter than token TTL {:?}",
                self.store_retention, self.token_ttl
            )));
        }
        if self.store_retention > defaults::MAX_STORE_RETENTION {
            return Err(ConfigError::invalid(format!(
                "store retention {:?} exceeds the maximum of {:?}",
                self.store_retention,
                defaults::MAX_STORE_RETENTION
            )));
        }
        if self.credentials.users.is_empty() || self.credentials.clients.is_empty() {
            return Err(ConfigError::invalid(
                "at least one user and one client must be configured",
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(defaults::TOKEN_TTL)
    }
}
