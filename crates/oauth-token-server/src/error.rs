//! Error types for the token server.
//!
//! Uses `thiserror` for structured error handling. Every [`AuthError`] maps to
//! exactly one HTTP status and one OAuth `error` code, and deliberately carries
//! no detail that would let a caller tell failure causes apart.

use std::path::PathBuf;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Generic description shared by every credential or grant-type failure.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Shared description for absent, malformed and expired bearer tokens.
pub const INVALID_TOKEN: &str = "token invalid/expired";

/// Errors terminating a token or resource request.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Missing or malformed form fields (400).
    #[error("malformed form: {0}")]
    Form(String),

    /// Bad user credentials, bad client credentials or unsupported grant type (401).
    #[error("invalid credentials")]
    Credentials,

    /// Missing, malformed or expired bearer token (401).
    #[error("token invalid/expired")]
    Token,

    /// A live token references a user the credential store cannot resolve (500).
    #[error("token references unknown user {user_id}")]
    Consistency {
        /// User id carried by the token record
        user_id: String,
    },
}

impl AuthError {
    /// Create a form error.
    #[must_use]
    pub fn form(message: impl Into<String>) -> Self {
        Self::Form(message.into())
    }

    /// Create a consistency error for the given user id.
    #[must_use]
    pub fn consistency(user_id: impl Into<String>) -> Self {
        Self::Consistency {
            user_id: user_id.into(),
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Form(_) => StatusCode::BAD_REQUEST,
            Self::Credentials | Self::Token => StatusCode::UNAUTHORIZED,
            Self::Consistency { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// OAuth `error` code for the response body.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Form(_) => "invalid_form",
            Self::Credentials => "invalid_request",
            Self::Token => "invalid_token",
            Self::Consistency { .. } => "read_db_fail",
        }
    }

    /// Caller-facing `error_description`.
    ///
    /// Never includes user ids or field values, only a fixed message per code.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Form(_) => "malformed form",
            Self::Credentials => INVALID_CREDENTIALS,
            Self::Token => INVALID_TOKEN,
            Self::Consistency { .. } => "failed to read token database",
        }
    }
}

/// JSON error body `{error, error_description}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub error_description: &'static str,
}

impl From<&AuthError> for ErrorBody {
    fn from(err: &AuthError) -> Self {
        Self {
            error: err.error_code(),
            error_description: err.description(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match &self {
            Self::Consistency { user_id } => {
                tracing::error!(user_id = %user_id, "Token references unresolvable user");
            }
            other => tracing::debug!(error = %other, "Request rejected"),
        }
        (self.status(), Json(ErrorBody::from(&self))).into_response()
    }
}

/// Errors from loading or validating configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Credentials file could not be read
    #[error("failed to read credentials file {path}: {source}")]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Credentials file is not valid JSON for [`crate::config::Credentials`]
    #[error("failed to parse credentials file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration values are inconsistent
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Create an invalid-configuration error.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

/// Result type alias for request handling.
pub type AuthResult<T> = Result<T, AuthError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
