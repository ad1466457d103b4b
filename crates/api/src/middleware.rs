use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use keystone_auth::TokenValidator;

use crate::app::errors::json_error;
use crate::context::SubjectContext;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn TokenValidator>,
}

/// Verify the bearer token and attach its subject to the request.
///
/// Rejections carry a distinct error code (`token_expired`,
/// `invalid_signature`, `malformed_token`, `missing_token`) so clients can
/// tell "sign in again" apart from "retry".
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer(req.headers()).ok_or_else(|| {
        json_error(
            StatusCode::UNAUTHORIZED,
            "missing_token",
            "expected 'Authorization: Bearer <token>'",
        )
    })?;

    let claims = state
        .jwt
        .validate(token, Utc::now())
        .map_err(|e| json_error(StatusCode::UNAUTHORIZED, e.code(), e.to_string()))?;

    req.extensions_mut().insert(SubjectContext::new(claims.sub));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }

    Some(token)
}
