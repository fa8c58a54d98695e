//! Fuzzing library for oauth-token-server.
//!
//! This crate provides fuzzing targets for the request parsing paths that
//! see untrusted input: the `Authorization` header, the token form and the
//! credentials file.
//!
//! # Usage
//!
//! ```bash
//! cd crates/sentinel-fuzz
//! cargo +nightly fuzz run fuzz_token_form -- -max_total_time=60
//! ```

pub use oauth_token_server::oauth::{resource, types};
