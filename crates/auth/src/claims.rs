use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use keystone_core::UserId;

/// Session token claims.
///
/// Only the subject and the validity window. Role and
/// email are resolved from the identity service on every authorization
/// decision, never from the token.
///
/// Timestamps keep sub-second precision, so lifetimes below one second are
/// enforced exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (identity id).
    pub sub: UserId,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

/// Why a presented token was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token is malformed: {0}")]
    Malformed(String),

    #[error("token not yet valid (issued_at is in the future)")]
    NotYetValid,

    #[error("invalid token time window (expires_at <= issued_at)")]
    InvalidTimeWindow,
}

impl TokenError {
    /// Stable machine-readable code for responses and logs.
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Expired => "token_expired",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::Malformed(_) => "malformed_token",
            TokenError::NotYetValid => "token_not_yet_valid",
            TokenError::InvalidTimeWindow => "invalid_time_window",
        }
    }

    /// Whether the client should send the user back to the login view.
    ///
    /// `NotYetValid` is clock skew between issuer and verifier; the client can
    /// retry silently instead.
    pub fn should_prompt_relogin(&self) -> bool {
        match self {
            TokenError::NotYetValid => false,
            TokenError::Expired
            | TokenError::InvalidSignature
            | TokenError::Malformed(_)
            | TokenError::InvalidTimeWindow => true,
        }
    }
}

/// Deterministically validate the claims' time window.
///
/// Note: this validates the *claims* only. Callers must have verified the
/// signature first, otherwise a forged token could report `Expired`.
pub fn validate_claims(claims: &SessionClaims, now: DateTime<Utc>) -> Result<(), TokenError> {
    if claims.expires_at <= claims.issued_at {
        return Err(TokenError::InvalidTimeWindow);
    }
    if now < claims.issued_at {
        return Err(TokenError::NotYetValid);
    }
    if now >= claims.expires_at {
        return Err(TokenError::Expired);
    }
    Ok(())
}
