use thiserror::Error;

use crate::{Identity, Role};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: role '{0}' required")]
    Forbidden(Role),
}

/// Require `identity` to hold a role that grants `required`.
///
/// - No IO
/// - No panics
/// - Pass an identity freshly resolved from the identity service, never one
///   reconstructed from token claims.
pub fn authorize(identity: &Identity, required: Role) -> Result<(), AuthzError> {
    if identity.role().grants(required) {
        Ok(())
    } else {
        tracing::debug!(subject = %identity.id(), %required, "authorization denied");
        Err(AuthzError::Forbidden(required))
    }
}
