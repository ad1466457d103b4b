//! The only two ways to change session state.

use serde::Serialize;

use keystone_auth::{Identity, IdentityDraft};

use crate::SessionError;

/// Which action was applied, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Login,
    Logout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Login(Identity),
    Logout,
}

impl SessionAction {
    /// Build a login action from an untrusted payload.
    ///
    /// Rejects drafts with missing or invalid fields, so the store never holds
    /// a partially populated user.
    pub fn login(draft: IdentityDraft) -> Result<Self, SessionError> {
        let identity = Identity::try_from(draft)?;
        Ok(Self::Login(identity))
    }

    /// Build a login action from an already validated identity.
    pub fn login_identity(identity: Identity) -> Self {
        Self::Login(identity)
    }

    pub fn logout() -> Self {
        Self::Logout
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            SessionAction::Login(_) => ActionKind::Login,
            SessionAction::Logout => ActionKind::Logout,
        }
    }
}

#[cfg(test)]
mod tests {
    use keystone_core::DomainError;

    use super::*;

    #[test]
    fn login_rejects_partial_identity() {
        let draft = IdentityDraft {
            id: Some("u1".into()),
            name: Some("Ann".into()),
            ..Default::default()
        };
        assert_eq!(
            SessionAction::login(draft),
            Err(SessionError::MalformedIdentity(DomainError::MissingField("email")))
        );
    }
}
