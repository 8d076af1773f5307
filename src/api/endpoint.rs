//! The two commits endpoints as parameters of one generic pipeline.

use crate::api::decode::{self, DateDecoding};
use crate::api::request;
use crate::error::{DecodeError, FetchError};
use crate::models::{CommitDetail, CommitSummary, RepositoryCoordinates};

/// A URL template paired with the shape its body decodes into.
pub trait Endpoint: Clone + PartialEq + Send + Sync + 'static {
    type Output: Clone + Send + Sync + 'static;

    /// Opening sentence of the user-facing failure message.
    const ERROR_PREFIX: &'static str;

    fn url(
        &self,
        base_url: &str,
        coordinates: &RepositoryCoordinates,
    ) -> Result<String, FetchError>;

    fn decode(&self, body: &[u8], dates: DateDecoding) -> Result<Self::Output, DecodeError>;
}

/// `GET /repos/{account}/{repository}/commits`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommitList;

impl Endpoint for CommitList {
    type Output = Vec<CommitSummary>;

    const ERROR_PREFIX: &'static str =
        "An error occurred while fetching the git commits for this repository.";

    fn url(
        &self,
        base_url: &str,
        coordinates: &RepositoryCoordinates,
    ) -> Result<String, FetchError> {
        request::commits_url(base_url, coordinates, None)
    }

    fn decode(&self, body: &[u8], dates: DateDecoding) -> Result<Self::Output, DecodeError> {
        decode::commit_summaries(body, dates)
    }
}

/// `GET /repos/{account}/{repository}/commits/{sha}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitFiles {
    pub sha: String,
}

impl CommitFiles {
    pub fn new(sha: impl Into<String>) -> Self {
        Self { sha: sha.into() }
    }
}

impl Endpoint for CommitFiles {
    type Output = CommitDetail;

    const ERROR_PREFIX: &'static str =
        "An error occurred while fetching the details for this commit.";

    fn url(
        &self,
        base_url: &str,
        coordinates: &RepositoryCoordinates,
    ) -> Result<String, FetchError> {
        request::commits_url(base_url, coordinates, Some(&self.sha))
    }

    fn decode(&self, body: &[u8], _dates: DateDecoding) -> Result<Self::Output, DecodeError> {
        decode::commit_detail(body)
    }
}
