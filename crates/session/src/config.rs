//! Client-side API configuration.

use std::time::Duration;

pub const ENVIRONMENT_VAR: &str = "APP_ENV";
pub const API_URL_VAR: &str = "API_URL";

const DEVELOPMENT_BASE_URL: &str = "http://localhost:5000";
const PRODUCTION_FALLBACK_URL: &str = "https://your-backend-url.herokuapp.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Unknown or missing values mean development.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("production") => Environment::Production,
            _ => Environment::Development,
        }
    }
}

/// Where and how the client talks to the auth API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub content_type: &'static str,
}

impl ClientConfig {
    pub fn for_environment<F>(environment: Environment, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = match environment {
            Environment::Development => DEVELOPMENT_BASE_URL.to_string(),
            Environment::Production => lookup(API_URL_VAR)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| {
                    tracing::warn!("{API_URL_VAR} not set; using placeholder production URL");
                    PRODUCTION_FALLBACK_URL.to_string()
                }),
        };

        Self {
            base_url,
            timeout: REQUEST_TIMEOUT,
            content_type: "application/json",
        }
    }

    pub fn from_env() -> Self {
        let lookup = |key: &str| std::env::var(key).ok();
        let environment = Environment::parse(lookup(ENVIRONMENT_VAR).as_deref());
        Self::for_environment(environment, lookup)
    }

    /// Absolute URL for an API path such as `/auth/login`.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_uses_localhost() {
        let cfg = ClientConfig::for_environment(Environment::Development, |_| {
            Some("https://ignored".into())
        });
        assert_eq!(cfg.base_url, "http://localhost:5000");
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert_eq!(cfg.url("/auth/login"), "http://localhost:5000/auth/login");
    }

    #[test]
    fn production_prefers_configured_url() {
        let cfg = ClientConfig::for_environment(Environment::Production, |k| {
            (k == API_URL_VAR).then(|| "https://api.example.com/".to_string())
        });
        assert_eq!(cfg.url("auth/me"), "https://api.example.com/auth/me");

        let cfg = ClientConfig::for_environment(Environment::Production, |_| None);
        assert_eq!(cfg.base_url, PRODUCTION_FALLBACK_URL);
    }

    #[test]
    fn environment_defaults_to_development() {
        assert_eq!(Environment::parse(None), Environment::Development);
        assert_eq!(Environment::parse(Some("staging")), Environment::Development);
        assert_eq!(Environment::parse(Some("production")), Environment::Production);
    }
}
