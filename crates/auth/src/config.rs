//! Token issuer configuration.
//!
//! Built once at startup and passed to [`TokenIssuer`](crate::TokenIssuer) and
//! [`Hs256TokenValidator`](crate::Hs256TokenValidator). Nothing in this crate
//! reads the environment at issue or verify time.

use thiserror::Error;

use crate::lifetime::{Lifetime, LifetimeError};

pub const SECRET_VAR: &str = "JWT_SECRET";
pub const LIFETIME_VAR: &str = "JWT_EXPIRE";
pub const ALLOW_INSECURE_VAR: &str = "KEYSTONE_ALLOW_INSECURE_SECRET";

/// Well-known secret used only when explicitly allowed. Anyone can forge
/// tokens signed with it.
pub const INSECURE_FALLBACK_SECRET: &str = "fallback-secret";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_SECRET is not set (set KEYSTONE_ALLOW_INSECURE_SECRET=1 to use the insecure fallback)")]
    MissingSecret,

    #[error("signing secret must not be empty")]
    EmptySecret,

    #[error("invalid JWT_EXPIRE '{value}': {source}")]
    InvalidLifetime {
        value: String,
        #[source]
        source: LifetimeError,
    },
}

/// HMAC signing secret. `Debug` never prints the key material.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningSecret {
    bytes: Vec<u8>,
    insecure_fallback: bool,
}

impl SigningSecret {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        Ok(Self {
            bytes,
            insecure_fallback: false,
        })
    }

    /// The publicly known fallback secret. Only for local development.
    pub fn insecure_fallback() -> Self {
        Self {
            bytes: INSECURE_FALLBACK_SECRET.as_bytes().to_vec(),
            insecure_fallback: true,
        }
    }

    pub fn is_insecure_fallback(&self) -> bool {
        self.insecure_fallback
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl core::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SigningSecret")
            .field("bytes", &"<redacted>")
            .field("insecure_fallback", &self.insecure_fallback)
            .finish()
    }
}

/// Issuer/verifier configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub signing_secret: SigningSecret,
    pub lifetime: Lifetime,
}

impl AuthConfig {
    pub fn new(signing_secret: SigningSecret, lifetime: Lifetime) -> Self {
        Self {
            signing_secret,
            lifetime,
        }
    }

    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key/value source.
    ///
    /// - `JWT_SECRET` is required unless `KEYSTONE_ALLOW_INSECURE_SECRET` is
    ///   `1`/`true`, in which case the fallback secret is used and a warning
    ///   is logged.
    /// - `JWT_EXPIRE` defaults to `7d`.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let signing_secret = match get(SECRET_VAR) {
            Some(secret) => SigningSecret::new(secret)?,
            None if get(ALLOW_INSECURE_VAR).is_some_and(|v| is_truthy(&v)) => {
                tracing::warn!(
                    "{SECRET_VAR} not set; signing tokens with the insecure fallback secret"
                );
                SigningSecret::insecure_fallback()
            }
            None => return Err(ConfigError::MissingSecret),
        };

        let lifetime = match get(LIFETIME_VAR) {
            Some(value) => value
                .parse::<Lifetime>()
                .map_err(|source| ConfigError::InvalidLifetime { value, source })?,
            None => Lifetime::default(),
        };

        Ok(Self::new(signing_secret, lifetime))
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::Duration;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_secret_refuses_to_load() {
        let err = AuthConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingSecret);

        // Empty counts as unset.
        let err = AuthConfig::from_lookup(lookup(&[(SECRET_VAR, "")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingSecret);
    }

    #[test]
    fn insecure_fallback_requires_opt_in_and_is_flagged() {
        let cfg = AuthConfig::from_lookup(lookup(&[(ALLOW_INSECURE_VAR, "1")])).unwrap();
        assert!(cfg.signing_secret.is_insecure_fallback());
        assert_eq!(cfg.signing_secret.as_bytes(), INSECURE_FALLBACK_SECRET.as_bytes());

        let err = AuthConfig::from_lookup(lookup(&[(ALLOW_INSECURE_VAR, "0")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingSecret);
    }

    #[test]
    fn configured_secret_and_lifetime() {
        let cfg = AuthConfig::from_lookup(lookup(&[
            (SECRET_VAR, "s3cret"),
            (LIFETIME_VAR, "12h"),
            (ALLOW_INSECURE_VAR, "1"),
        ]))
        .unwrap();
        assert!(!cfg.signing_secret.is_insecure_fallback());
        assert_eq!(cfg.lifetime.as_duration(), Duration::hours(12));
    }

    #[test]
    fn lifetime_defaults_and_rejects_garbage() {
        let cfg = AuthConfig::from_lookup(lookup(&[(SECRET_VAR, "s")])).unwrap();
        assert_eq!(cfg.lifetime, Lifetime::default());

        let err = AuthConfig::from_lookup(lookup(&[(SECRET_VAR, "s"), (LIFETIME_VAR, "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLifetime { .. }));
    }

    #[test]
    fn unissuable_lifetime_is_rejected_at_load() {
        let err = AuthConfig::from_lookup(lookup(&[(SECRET_VAR, "s"), (LIFETIME_VAR, "1000000y")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidLifetime { source: crate::LifetimeError::OutOfRange(_), .. }
        ));
    }

    #[test]
    fn debug_redacts_secret() {
        let secret = SigningSecret::new("hunter2").unwrap();
        assert!(!format!("{secret:?}").contains("hunter2"));
    }
}
