//! Commit history browser for the GitHub REST API.
//!
//! The crate is one pipeline, used twice:
//!
//! ```text
//! request::commits_url → Transport::get → response::validate → decode → Fetcher
//! ```
//!
//! [`CommitListFetcher`] fetches `GET /repos/{account}/{repository}/commits`,
//! [`CommitDetailFetcher`] fetches `.../commits/{sha}`. Both publish a
//! [`FetchState`] that a front end renders, and [`RepoSettings`] feeds
//! coordinate edits back into the list fetcher.

pub mod api;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod settings;

pub use api::{CommitFiles, CommitList, CommitsClient, DateDecoding, Endpoint};
pub use config::Config;
pub use error::{DecodeError, FetchError};
pub use fetcher::{CommitDetailFetcher, CommitListFetcher, FetchState, Fetcher, Phase};
pub use models::{CommitDetail, CommitSummary, FileChange, PersonInfo, RepositoryCoordinates};
pub use settings::RepoSettings;
