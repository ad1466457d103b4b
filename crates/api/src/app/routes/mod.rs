use axum::{
    Router,
    routing::{get, post},
};

pub mod admin;
pub mod auth;
pub mod common;
pub mod system;

/// Endpoints reachable without a token.
pub fn public() -> Router {
    Router::new().route("/auth/login", post(auth::login))
}

/// Endpoints behind the bearer-token middleware.
pub fn protected() -> Router {
    Router::new()
        .route("/auth/me", get(auth::me))
        .nest("/admin", admin::router())
}
