//! Contract with the external identity service.
//!
//! Credential checks and user storage live outside this workspace. The api
//! layer only talks to them through [`IdentityProvider`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use keystone_core::UserId;

use crate::Identity;

/// Login credentials as submitted by the client.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl core::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("identity service unavailable: {0}")]
    Unavailable(String),
}

/// External identity collaborator.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Check credentials and return the authenticated identity.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AuthFailure>;

    /// Look up the current identity for a token subject.
    ///
    /// `Ok(None)` means the subject no longer exists.
    async fn resolve(&self, id: &UserId) -> Result<Option<Identity>, AuthFailure>;
}
