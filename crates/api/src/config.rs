//! Server process configuration (everything except the token settings, which
//! live in [`keystone_auth::AuthConfig`]).

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

pub const BIND_ADDR_VAR: &str = "KEYSTONE_BIND_ADDR";
pub const IDENTITY_URL_VAR: &str = "IDENTITY_SERVICE_URL";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const IDENTITY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServerConfigError {
    #[error("IDENTITY_SERVICE_URL is not set")]
    MissingIdentityUrl,

    #[error("invalid KEYSTONE_BIND_ADDR '{0}'")]
    InvalidBindAddr(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub identity_service_url: String,
    pub identity_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup(BIND_ADDR_VAR)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| ServerConfigError::InvalidBindAddr(raw_addr.clone()))?;

        let identity_service_url = lookup(IDENTITY_URL_VAR)
            .filter(|v| !v.is_empty())
            .ok_or(ServerConfigError::MissingIdentityUrl)?;

        Ok(Self {
            bind_addr,
            identity_service_url,
            identity_timeout: IDENTITY_TIMEOUT,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_address() {
        let cfg = ServerConfig::from_lookup(|k| {
            (k == IDENTITY_URL_VAR).then(|| "http://identity:8000".to_string())
        })
        .unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:5000".parse().unwrap());
        assert_eq!(cfg.identity_service_url, "http://identity:8000");
    }

    #[test]
    fn identity_url_is_required() {
        assert_eq!(
            ServerConfig::from_lookup(|_| None),
            Err(ServerConfigError::MissingIdentityUrl)
        );
    }

    #[test]
    fn rejects_bad_bind_address() {
        let err = ServerConfig::from_lookup(|k| match k {
            BIND_ADDR_VAR => Some("localhost".to_string()),
            _ => Some("http://identity".to_string()),
        })
        .unwrap_err();
        assert_eq!(err, ServerConfigError::InvalidBindAddr("localhost".into()));
    }
}
