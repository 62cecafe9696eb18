//! HTTP adapters for redirect expansion
//!
//! [`UpstreamExpander`] asks the shortener itself for its `Location` header
//! without following it. [`ExpanderClient`] calls a running expander service
//! (`GET {base}/expand?url=...`), which in turn uses an `UpstreamExpander`.

use crate::resolver::RedirectResolver;
use async_trait::async_trait;
use netzero_core::{NetZeroError, Result};
use reqwest::header::LOCATION;
use reqwest::{redirect, Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Reason given when an upstream response carries no `Location` header
pub const NO_REDIRECT_FOUND: &str = "No redirect found";

fn map_request_error(error: reqwest::Error, timeout: Duration) -> NetZeroError {
    if error.is_timeout() {
        NetZeroError::ResolverTimeout {
            seconds: timeout.as_secs().max(1),
        }
    } else if error.is_connect() {
        NetZeroError::ResolverUnreachable {
            reason: error.to_string(),
        }
    } else {
        NetZeroError::ResolverBadResponse {
            reason: error.to_string(),
        }
    }
}

fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .redirect(redirect::Policy::none())
        .timeout(timeout)
        .build()
        .map_err(|e| NetZeroError::ResolverUnreachable {
            reason: format!("Failed to build HTTP client: {}", e),
        })
}

/// Follows exactly one redirect hop against the shortener
#[derive(Clone)]
pub struct UpstreamExpander {
    client: Client,
    timeout: Duration,
}

impl UpstreamExpander {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            timeout,
        })
    }

    /// Request the link once and read its `Location` header
    ///
    /// Relative locations are resolved against the requested link. Returns
    /// `None` when the response has no `Location`.
    pub async fn follow_once(&self, link: &str) -> Result<Option<String>> {
        let base = Url::parse(link).map_err(|e| NetZeroError::ResolverBadResponse {
            reason: format!("Invalid URL '{}': {}", link, e),
        })?;

        let response = self
            .client
            .get(base.clone())
            .send()
            .await
            .map_err(|e| map_request_error(e, self.timeout))?;

        let Some(location) = response.headers().get(LOCATION) else {
            tracing::debug!(link = %link, status = %response.status(), "No Location header");
            return Ok(None);
        };

        let location = location
            .to_str()
            .map_err(|e| NetZeroError::ResolverBadResponse {
                reason: format!("Unreadable Location header: {}", e),
            })?;

        let expanded = base
            .join(location)
            .map_err(|e| NetZeroError::ResolverBadResponse {
                reason: format!("Invalid Location '{}': {}", location, e),
            })?;

        Ok(Some(expanded.to_string()))
    }
}

#[async_trait]
impl RedirectResolver for UpstreamExpander {
    async fn expand(&self, link: &str) -> Result<String> {
        self.follow_once(link)
            .await?
            .ok_or_else(|| NetZeroError::ResolverBadResponse {
                reason: NO_REDIRECT_FOUND.to_string(),
            })
    }
}

#[derive(Debug, Deserialize)]
struct ExpandResponse {
    expanded: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Client for a running expander service
#[derive(Clone)]
pub struct ExpanderClient {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl ExpanderClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(NetZeroError::ConfigMissing {
                key: "resolver_url".to_string(),
            });
        }

        let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/'))).map_err(|e| {
            NetZeroError::ConfigInvalid {
                key: "resolver_url".to_string(),
                reason: e.to_string(),
            }
        })?;
        let endpoint = base.join("expand").map_err(|e| NetZeroError::ConfigInvalid {
            key: "resolver_url".to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client: build_client(timeout)?,
            endpoint,
            timeout,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RedirectResolver for ExpanderClient {
    async fn expand(&self, link: &str) -> Result<String> {
        let mut endpoint = self.endpoint.clone();
        endpoint.query_pairs_mut().append_pair("url", link);

        tracing::debug!(endpoint = %self.endpoint, link = %link, "Requesting expansion");

        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .map_err(|e| map_request_error(e, self.timeout))?;

        let status = response.status();
        if status == StatusCode::OK {
            let body: ExpandResponse =
                response
                    .json()
                    .await
                    .map_err(|e| NetZeroError::ResolverBadResponse {
                        reason: format!("Failed to parse expander response: {}", e),
                    })?;
            return Ok(body.expanded);
        }

        let reason = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => format!("Expander returned status {}", status),
        };

        Err(NetZeroError::ResolverBadResponse { reason })
    }
}
