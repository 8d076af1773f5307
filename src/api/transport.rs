//! One-shot HTTP GET behind a swappable trait.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;

/// Opaque cause of a transport failure.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Boxed future type alias used by [`Transport`] to keep the trait dyn-compatible.
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = std::result::Result<RawResponse, BoxError>> + Send + 'a>>;

/// What came back from the server, before any validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Verbatim `Content-Type` header, if the server sent one.
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Performs exactly one GET per call. No retries.
pub trait Transport: Send + Sync {
    /// Fetches `url`, resolving once with either the raw response or the
    /// cause of the transport failure.
    fn get<'a>(&'a self, url: &'a str) -> TransportFuture<'a>;
}

/// [`Transport`] over a `reqwest` client that keeps no idle connections.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build the client. Every GET opens its own connection; GitHub rejects
    /// requests without a `User-Agent`.
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn get<'a>(&'a self, url: &'a str) -> TransportFuture<'a> {
        Box::pin(async move {
            let response = self
                .client
                .get(url)
                .header(ACCEPT, "application/vnd.github+json")
                .header("X-GitHub-Api-Version", "2022-11-28")
                .send()
                .await?;

            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());
            let body = response.bytes().await?.to_vec();

            Ok::<_, BoxError>(RawResponse {
                status,
                content_type,
                body,
            })
        })
    }
}
