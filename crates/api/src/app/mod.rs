//! HTTP API application wiring (Axum router + shared state).
//!
//! - `routes/`: HTTP handlers (one file per area)
//! - `errors.rs`: consistent JSON error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use keystone_auth::{AuthConfig, Hs256TokenValidator, IdentityProvider, TokenIssuer};

use crate::middleware;

pub mod errors;
pub mod routes;

/// Shared per-process state handed to handlers.
#[derive(Clone)]
pub struct AppState {
    pub issuer: Arc<TokenIssuer>,
    pub identities: Arc<dyn IdentityProvider>,
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &AuthConfig, identities: Arc<dyn IdentityProvider>) -> Router {
    if config.signing_secret.is_insecure_fallback() {
        tracing::warn!("serving with the insecure fallback signing secret; tokens are forgeable");
    }

    let jwt = Arc::new(Hs256TokenValidator::from_config(config));
    let auth_state = middleware::AuthState { jwt };

    let state = AppState {
        issuer: Arc::new(TokenIssuer::from_config(config)),
        identities,
    };

    // Protected routes: require a valid bearer token.
    let protected = routes::protected().route_layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::public())
        .merge(protected)
        .layer(ServiceBuilder::new().layer(Extension(state)))
}
