//! `keystone-auth` — session token issuance and verification.
//!
//! This crate is intentionally decoupled from HTTP and storage. Credential
//! checks belong to the external identity service behind [`IdentityProvider`].

pub mod authorize;
pub mod claims;
pub mod config;
pub mod identity;
pub mod lifetime;
pub mod provider;
pub mod roles;
pub mod token;

pub use authorize::{AuthzError, authorize};
pub use claims::{SessionClaims, TokenError, validate_claims};
pub use config::{AuthConfig, ConfigError, SigningSecret};
pub use identity::{Identity, IdentityDraft};
pub use lifetime::{Lifetime, LifetimeError};
pub use provider::{AuthFailure, Credentials, IdentityProvider};
pub use roles::Role;
pub use token::{
    Hs256TokenValidator, IssueError, SessionToken, TokenIssuer, TokenValidator, issue_token,
    verify_token,
};
