use axum::http::StatusCode;
use axum::response::Response;

use keystone_auth::{Identity, IdentityProvider};

use crate::app::errors::{auth_failure_to_response, json_error};
use crate::context::SubjectContext;

/// Re-resolve the token subject against the identity service.
///
/// Tokens carry no role, so every authorization decision goes through here.
/// An identity whose id differs from the token subject is treated as absent.
pub async fn resolve_subject(
    identities: &dyn IdentityProvider,
    subject: &SubjectContext,
) -> Result<Identity, Response> {
    match identities.resolve(subject.subject()).await {
        Ok(Some(identity)) if identity.id() == subject.subject() => Ok(identity),
        Ok(Some(identity)) => {
            tracing::warn!(
                subject = %subject.subject(),
                resolved = %identity.id(),
                "identity service returned a different subject"
            );
            Err(unknown_subject(subject))
        }
        Ok(None) => Err(unknown_subject(subject)),
        Err(e) => Err(auth_failure_to_response(e)),
    }
}

fn unknown_subject(subject: &SubjectContext) -> Response {
    json_error(
        StatusCode::UNAUTHORIZED,
        "unknown_subject",
        format!("no identity for subject '{}'", subject.subject()),
    )
}
