//! OAuth endpoint handlers.
//!
//! - `POST /oauth/token`: password grant (RFC 6749 §4.3)
//! - `GET /oauth/resource`: bearer token introspection for the token owner

use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Response},
};

use super::transport::HttpState;
use crate::error::AuthError;
use crate::oauth::grant::{GrantStage, reject};
use crate::oauth::types::{TokenRequest, TokenResponse};

// ─── Token Endpoint ──────────────────────────────────────────────────────────

/// `POST /oauth/token`
///
/// Exchange user and client credentials for a token pair.
pub async fn handle_token(
    State(state): State<Arc<HttpState>>,
    form: Result<Form<TokenRequest>, FormRejection>,
) -> Response {
    let req = match form {
        Ok(Form(req)) => req,
        Err(rejection) => {
            let err = AuthError::form(rejection.body_text());
            return reject(GrantStage::ParsingForm, err).into_response();
        }
    };

    match state.grants.grant(req).await {
        Ok(resp) => token_success(resp),
        Err(err) => err.into_response(),
    }
}

/// Build a token response with required OAuth 2.0 cache headers (RFC 6749 §5.1).
fn token_success(resp: TokenResponse) -> Response {
    let mut response = Json(resp).into_response();

    let headers = response.headers_mut();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    response
}

// ─── Resource Endpoint ───────────────────────────────────────────────────────

/// `GET /oauth/resource`
///
/// Return the account behind a valid bearer token.
pub async fn handle_resource(State(state): State<Arc<HttpState>>, headers: HeaderMap) -> Response {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match state.resources.authorize(authorization).await {
        Ok(resp) => Json(resp).into_response(),
        Err(err) => err.into_response(),
    }
}
