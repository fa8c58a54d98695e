//! HTTP transport.
//!
//! Builds the axum router: OAuth routes, health checks, CORS and request tracing.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::config::Config;
use crate::oauth::{CredentialStore, GrantValidator, ResourceAuthorizer, TokenIssuer, TokenStore};

/// Shared state for HTTP handlers.
#[derive(Debug)]
pub struct HttpState {
    pub grants: GrantValidator,
    pub resources: ResourceAuthorizer,
    pub store: TokenStore,
}

impl HttpState {
    /// Wire the OAuth components from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let credentials = Arc::new(CredentialStore::new(&config.credentials));
        let store = TokenStore::new(config.store_retention);
        let issuer = TokenIssuer::new(store.clone(), config.token_ttl);

        Self {
            grants: GrantValidator::new(Arc::clone(&credentials), issuer),
            resources: ResourceAuthorizer::new(store.clone(), credentials),
            store,
        }
    }
}

/// Create the HTTP router.
///
/// `GET /oauth/resource` is only routed when `enable_resource` is set.
pub fn create_router(state: Arc<HttpState>, enable_resource: bool) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/oauth/token", post(handlers::handle_token));

    if enable_resource {
        router = router.route("/oauth/resource", get(handlers::handle_resource));
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "oauth-token-server",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn readiness_check(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ready",
        "service": "oauth-token-server",
        "version": env!("CARGO_PKG_VERSION"),
        "active_tokens": state.store.entry_count()
    }))
}
