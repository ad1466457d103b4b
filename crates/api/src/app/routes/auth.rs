use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde::Serialize;

use keystone_auth::{Credentials, Identity, SessionToken};

use crate::app::AppState;
use crate::app::errors::{auth_failure_to_response, json_error};
use crate::app::routes::common::resolve_subject;
use crate::context::SubjectContext;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: SessionToken,
    pub user: Identity,
}

pub async fn login(
    Extension(state): Extension<AppState>,
    Json(credentials): Json<Credentials>,
) -> axum::response::Response {
    let identity = match state.identities.authenticate(&credentials).await {
        Ok(identity) => identity,
        Err(e) => return auth_failure_to_response(e),
    };

    let token = match state.issuer.issue(identity.id(), Utc::now()) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "token issuance failed");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "issue_failed", e.to_string());
        }
    };

    tracing::info!(user_id = %identity.id(), "login succeeded");
    Json(LoginResponse {
        token,
        user: identity,
    })
    .into_response()
}

pub async fn me(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<SubjectContext>,
) -> axum::response::Response {
    match resolve_subject(state.identities.as_ref(), &subject).await {
        Ok(identity) => Json(identity).into_response(),
        Err(response) => response,
    }
}
