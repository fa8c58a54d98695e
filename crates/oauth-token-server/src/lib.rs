//! Password-grant OAuth2 token server.
//!
//! Issues short-lived bearer tokens to users who present valid credentials
//! together with a registered client, and exchanges live tokens for account
//! data on a resource endpoint.
//!
//! # Features
//!
//! - **Password grant**: `POST /oauth/token` with form-encoded credentials
//! - **Resource lookup**: `GET /oauth/resource` with `Authorization: Bearer`
//! - **Expiring store**: logical expiry checked on every read, physical
//!   eviction at twice the token lifetime
//!
//! # Example
//!
//! ```no_run
//! use oauth_token_server::{config::Config, server::TokenServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!     TokenServer::new(config).run_http().await
//! }
//! ```

pub mod config;
pub mod error;
pub mod oauth;
pub mod server;

pub use config::{Config, Credentials};
pub use error::{AuthError, ConfigError};
pub use server::TokenServer;
