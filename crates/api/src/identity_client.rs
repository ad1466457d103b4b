//! [`IdentityProvider`] backed by the external identity service over HTTP.
//!
//! - `POST {base}/authenticate` with `{email, password}`: 200 + identity, or
//!   401/403 for bad credentials
//! - `GET {base}/users/{id}`: 200 + identity, or 404
//!
//! Ids are opaque, so they are pushed as a single percent-encoded path
//! segment and never spliced into the URL text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use thiserror::Error;

use keystone_auth::{AuthFailure, Credentials, Identity, IdentityDraft, IdentityProvider};
use keystone_core::UserId;

#[derive(Debug, Error)]
pub enum IdentityClientError {
    #[error("invalid identity service URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpIdentityProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, IdentityClientError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| IdentityClientError::InvalidBaseUrl(base_url.to_string()))?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// `{base}/{segments...}` with every segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AuthFailure> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AuthFailure::Unavailable(format!("cannot extend URL '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AuthFailure> {
        let res = self
            .client
            .post(self.endpoint(&["authenticate"])?)
            .json(credentials)
            .send()
            .await
            .map_err(unavailable)?;

        match res.status() {
            StatusCode::OK => parse_identity(res).await,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuthFailure::InvalidCredentials),
            status => Err(AuthFailure::Unavailable(format!("authenticate returned {status}"))),
        }
    }

    async fn resolve(&self, id: &UserId) -> Result<Option<Identity>, AuthFailure> {
        let res = self
            .client
            .get(self.endpoint(&["users", id.as_str()])?)
            .send()
            .await
            .map_err(unavailable)?;

        match res.status() {
            StatusCode::OK => parse_identity(res).await.map(Some),
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(AuthFailure::Unavailable(format!("user lookup returned {status}"))),
        }
    }
}

async fn parse_identity(res: reqwest::Response) -> Result<Identity, AuthFailure> {
    let draft: IdentityDraft = res.json().await.map_err(unavailable)?;
    Identity::try_from(draft)
        .map_err(|e| AuthFailure::Unavailable(format!("identity service sent an invalid identity: {e}")))
}

fn unavailable(err: reqwest::Error) -> AuthFailure {
    AuthFailure::Unavailable(err.to_string())
}
