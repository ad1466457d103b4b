//! HS256 session token issuance and verification.
//!
//! Tokens are standard three-part JWTs carrying [`SessionClaims`]. Expiry is
//! enforced here rather than by `jsonwebtoken`, because the registered `exp`
//! claim only has one-second resolution.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use keystone_core::UserId;

use crate::claims::{SessionClaims, TokenError, validate_claims};
use crate::config::{AuthConfig, SigningSecret};
use crate::lifetime::Lifetime;

/// Signed session token, opaque to everything but the validator.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl core::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

impl core::fmt::Display for SessionToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Error)]
pub enum IssueError {
    #[error("token lifetime overflows the representable time range")]
    LifetimeOverflow,

    #[error("failed to encode token: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

/// Issue a token for `subject`, valid from `now` for `lifetime`.
pub fn issue_token(
    subject: &UserId,
    secret: &SigningSecret,
    lifetime: Lifetime,
    now: DateTime<Utc>,
) -> Result<SessionToken, IssueError> {
    TokenIssuer::new(secret, lifetime).issue(subject, now)
}

/// Verify `token` against `secret` at instant `now`.
pub fn verify_token(
    token: &str,
    secret: &SigningSecret,
    now: DateTime<Utc>,
) -> Result<SessionClaims, TokenError> {
    Hs256TokenValidator::new(secret).validate(token, now)
}

/// Mints session tokens. Holds no mutable state; share it behind an `Arc`.
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    lifetime: Lifetime,
}

impl TokenIssuer {
    pub fn new(secret: &SigningSecret, lifetime: Lifetime) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
            lifetime,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.signing_secret, config.lifetime)
    }

    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    pub fn issue(&self, subject: &UserId, now: DateTime<Utc>) -> Result<SessionToken, IssueError> {
        let expires_at = now
            .checked_add_signed(self.lifetime.as_duration())
            .ok_or(IssueError::LifetimeOverflow)?;

        let claims = SessionClaims {
            sub: subject.clone(),
            issued_at: now,
            expires_at,
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.key)?;

        tracing::debug!(subject = %subject, %expires_at, "session token issued");
        Ok(SessionToken(token))
    }
}

/// Verifies presented tokens and returns their claims.
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError>;
}

/// [`TokenValidator`] for HS256 tokens signed with a shared secret.
#[derive(Clone)]
pub struct Hs256TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256TokenValidator {
    pub fn new(secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // The time window is checked by `validate_claims` with sub-second
        // precision; the registered claims are not used.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.required_spec_claims.clear();

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.signing_secret)
    }
}

impl TokenValidator for Hs256TokenValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, TokenError> {
        // Signature first: the time window of an unverified token means nothing.
        let data = jsonwebtoken::decode::<SessionClaims>(token, &self.key, &self.validation)
            .map_err(map_decode_error)?;

        let claims = data.claims;
        if let Err(err) = validate_claims(&claims, now) {
            tracing::debug!(subject = %claims.sub, error = %err, "session token rejected");
            return Err(err);
        }
        Ok(claims)
    }
}

fn map_decode_error(err: jsonwebtoken::errors::Error) -> TokenError {
    let mapped = match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
        _ => TokenError::Malformed(err.to_string()),
    };
    tracing::debug!(error = %mapped, "session token rejected");
    mapped
}
