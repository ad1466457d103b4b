use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use keystone_auth::{AuthFailure, AuthzError};

pub fn auth_failure_to_response(err: AuthFailure) -> axum::response::Response {
    match err {
        AuthFailure::InvalidCredentials => json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "invalid email or password",
        ),
        AuthFailure::Unavailable(msg) => {
            tracing::warn!(error = %msg, "identity service unavailable");
            json_error(StatusCode::SERVICE_UNAVAILABLE, "identity_unavailable", msg)
        }
    }
}

pub fn authz_error_to_response(err: AuthzError) -> axum::response::Response {
    match err {
        AuthzError::Forbidden(_) => json_error(StatusCode::FORBIDDEN, "forbidden", err.to_string()),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
