//! Authenticated identity as returned by the identity service.
//!
//! An [`Identity`] can only be built through validation, so holders never see
//! a partially populated user. Untrusted input arrives as an [`IdentityDraft`]
//! and is promoted with `Identity::try_from`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use keystone_core::{DomainError, DomainResult, UserId};

use crate::Role;

/// Stable attributes of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IdentityDraft")]
pub struct Identity {
    id: UserId,
    name: String,
    email: String,
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl Identity {
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> DomainResult<Self> {
        let name = name.into();
        let email = email.into();

        if name.trim().is_empty() {
            return Err(DomainError::validation("name must not be blank"));
        }
        validate_email(&email)?;

        Ok(Self {
            id,
            name,
            email,
            role,
            created_at: None,
        })
    }

    /// Attach the account creation timestamp reported by the identity service.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Unvalidated identity payload (e.g. a JSON body from the identity service).
///
/// Every field is optional so a missing field surfaces as a
/// [`DomainError::MissingField`] instead of an opaque decode failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityDraft {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    #[serde(alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<IdentityDraft> for Identity {
    type Error = DomainError;

    fn try_from(draft: IdentityDraft) -> Result<Self, Self::Error> {
        let id = UserId::new(draft.id.ok_or(DomainError::missing("id"))?)?;
        let name = draft.name.ok_or(DomainError::missing("name"))?;
        let email = draft.email.ok_or(DomainError::missing("email"))?;
        let role: Role = draft.role.ok_or(DomainError::missing("role"))?.parse()?;

        let identity = Identity::new(id, name, email, role)?;
        Ok(match draft.created_at {
            Some(ts) => identity.with_created_at(ts),
            None => identity,
        })
    }
}

impl From<Identity> for IdentityDraft {
    fn from(identity: Identity) -> Self {
        Self {
            id: Some(identity.id.into()),
            name: Some(identity.name),
            email: Some(identity.email),
            role: Some(identity.role.as_str().to_string()),
            created_at: identity.created_at,
        }
    }
}

/// Minimal structural email check: `local@domain` with both parts non-empty.
pub fn validate_email(email: &str) -> DomainResult<()> {
    match email.split_once('@') {
        Some((local, domain))
            if !local.trim().is_empty() && !domain.trim().is_empty() && !domain.contains('@') =>
        {
            Ok(())
        }
        _ => Err(DomainError::validation(format!("invalid email '{email}'"))),
    }
}
