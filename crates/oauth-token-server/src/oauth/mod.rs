//! Password-grant token lifecycle.
//!
//! - [`credentials`]: static user and client lookups
//! - [`issuer`]: random token generation
//! - [`store`]: expiring token records
//! - [`grant`]: token endpoint validation
//! - [`resource`]: bearer token validation

pub mod credentials;
pub mod grant;
pub mod issuer;
pub mod resource;
pub mod store;
pub mod types;

pub use credentials::CredentialStore;
pub use grant::{GrantStage, GrantValidator};
pub use issuer::TokenIssuer;
pub use resource::ResourceAuthorizer;
pub use store::TokenStore;
