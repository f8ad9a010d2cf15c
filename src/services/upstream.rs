//! Client for the third-party unlocking endpoints
//!
//! One GET per parse: `{endpoint}?url={encoded url}`. The body is decoded as
//! JSON whatever the HTTP status; the envelope inside decides success. No
//! retries and no timeout beyond the reqwest defaults.

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

/// Same set `encodeURIComponent` escapes, which the upstreams expect.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("undecodable response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Fetches the raw JSON an upstream returns for a submitted URL.
#[async_trait]
pub trait UpstreamFetcher: Send + Sync {
    async fn fetch(&self, endpoint: &str, url: &str) -> Result<Value, UpstreamError>;
}

#[derive(Clone)]
pub struct HttpUpstream {
    http: Client,
}

impl HttpUpstream {
    pub fn new(user_agent: Option<&str>) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(user_agent) = user_agent {
            builder = builder.user_agent(user_agent);
        }

        Ok(Self {
            http: builder.build()?,
        })
    }
}

#[async_trait]
impl UpstreamFetcher for HttpUpstream {
    async fn fetch(&self, endpoint: &str, url: &str) -> Result<Value, UpstreamError> {
        let resp = self
            .http
            .get(request_url(endpoint, url))
            .send()
            .await
            .map_err(UpstreamError::Http)?;

        tracing::debug!(status = %resp.status(), endpoint, "upstream responded");

        resp.json::<Value>().await.map_err(UpstreamError::Decode)
    }
}

/// Appends the submitted URL to `endpoint` as the `url` query parameter.
pub fn request_url(endpoint: &str, url: &str) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{}{}url={}", endpoint, separator, percent_encode(url))
}

fn percent_encode(s: &str) -> String {
    percent_encoding::utf8_percent_encode(s, URI_COMPONENT).to_string()
}
