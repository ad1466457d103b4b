//! Admin-only endpoints.
//!
//! The role check uses the identity as it is *now*, resolved from the
//! identity service, not anything embedded in the token.

use axum::{Json, Router, extract::Extension, response::IntoResponse, routing::get};
use serde_json::json;

use keystone_auth::{Role, authorize};

use crate::app::AppState;
use crate::app::errors::authz_error_to_response;
use crate::app::routes::common::resolve_subject;
use crate::context::SubjectContext;

pub fn router() -> Router {
    Router::new().route("/overview", get(overview))
}

pub async fn overview(
    Extension(state): Extension<AppState>,
    Extension(subject): Extension<SubjectContext>,
) -> axum::response::Response {
    let identity = match resolve_subject(state.identities.as_ref(), &subject).await {
        Ok(identity) => identity,
        Err(response) => return response,
    };

    if let Err(e) = authorize(&identity, Role::Admin) {
        return authz_error_to_response(e);
    }

    Json(json!({
        "user": identity,
        "admin": true,
    }))
    .into_response()
}
