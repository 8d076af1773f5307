//! GitHub commits API client.
//!
//! # CHANGELOG (recent first, max 5 entries)
//! 10/16/2026 - Generic request/validate/decode pipeline over a Transport

use std::sync::Arc;

use anyhow::Result;

use crate::api::decode::DateDecoding;
use crate::api::endpoint::{CommitFiles, CommitList, Endpoint};
use crate::api::request::DEFAULT_API_URL;
use crate::api::response;
use crate::api::transport::{ReqwestTransport, Transport};
use crate::config::Config;
use crate::error::FetchError;
use crate::models::{CommitDetail, CommitSummary, RepositoryCoordinates};

/// Runs the fetch pipeline for any [`Endpoint`].
pub struct CommitsClient {
    transport: Arc<dyn Transport>,
    base_url: String,
    dates: DateDecoding,
}

impl CommitsClient {
    /// Client over the live HTTP transport, configured from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = ReqwestTransport::new(&config.user_agent)?;

        Ok(Self::with_transport(Arc::new(transport))
            .base_url(&config.api_url)
            .date_decoding(config.date_decoding))
    }

    /// Client over an arbitrary transport, pointed at the public API.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: DEFAULT_API_URL.to_string(),
            dates: DateDecoding::default(),
        }
    }

    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn date_decoding(mut self, dates: DateDecoding) -> Self {
        self.dates = dates;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.base_url
    }

    /// Build the request URL for `endpoint`. Fails without touching the network.
    pub fn request_url<E: Endpoint>(
        &self,
        endpoint: &E,
        coordinates: &RepositoryCoordinates,
    ) -> std::result::Result<String, FetchError> {
        endpoint.url(&self.base_url, coordinates)
    }

    /// Transport, validate and decode an already-built URL.
    pub async fn execute<E: Endpoint>(
        &self,
        endpoint: &E,
        url: &str,
    ) -> std::result::Result<E::Output, FetchError> {
        tracing::debug!(url, "GET");
        let outcome = self.transport.get(url).await;
        let body = response::validate(outcome)?;
        Ok(endpoint.decode(&body, self.dates)?)
    }

    /// The whole pipeline: build the URL, then [`execute`](Self::execute).
    pub async fn fetch<E: Endpoint>(
        &self,
        endpoint: &E,
        coordinates: &RepositoryCoordinates,
    ) -> std::result::Result<E::Output, FetchError> {
        let url = self.request_url(endpoint, coordinates)?;
        self.execute(endpoint, &url).await
    }

    /// List commits on the default branch.
    pub async fn list_commits(
        &self,
        coordinates: &RepositoryCoordinates,
    ) -> std::result::Result<Vec<CommitSummary>, FetchError> {
        self.fetch(&CommitList, coordinates).await
    }

    /// Get the files changed by one commit.
    pub async fn get_commit(
        &self,
        coordinates: &RepositoryCoordinates,
        sha: &str,
    ) -> std::result::Result<CommitDetail, FetchError> {
        self.fetch(&CommitFiles::new(sha), coordinates).await
    }
}
