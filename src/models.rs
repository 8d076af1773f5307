//! Data models for the GitHub commits API.
//!
//! # CHANGELOG (recent first, max 5 entries)
//! 10/16/2026 - Commit summary and commit detail records with wire encoding

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ACCOUNT: &str = "mikenowakme";
pub const DEFAULT_REPOSITORY: &str = "GitMyCommits";

/// Display width of an abbreviated commit hash.
pub const SHORT_HASH_LEN: usize = 7;

/// Which repository the fetchers query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryCoordinates {
    pub account: String,
    pub repository: String,
}

impl RepositoryCoordinates {
    pub fn new(account: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            repository: repository.into(),
        }
    }
}

impl Default for RepositoryCoordinates {
    fn default() -> Self {
        Self::new(DEFAULT_ACCOUNT, DEFAULT_REPOSITORY)
    }
}

impl fmt::Display for RepositoryCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.account, self.repository)
    }
}

/// Commit author or committer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonInfo {
    pub name: String,
    pub email: String,
    pub date: DateTime<Utc>,
}

/// One entry of `GET /repos/{account}/{repository}/commits`.
///
/// Serializes back to the nested shape the API returns, so a summary can be
/// re-emitted as JSON and decoded again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "CommitSummaryWire")]
pub struct CommitSummary {
    /// GraphQL node id, unique per commit.
    pub id: String,
    pub sha: String,
    pub author: PersonInfo,
    pub committer: PersonInfo,
    pub message: String,
}

impl CommitSummary {
    /// The sha cut down to at most [`SHORT_HASH_LEN`] characters.
    pub fn commit_hash(&self) -> &str {
        match self.sha.char_indices().nth(SHORT_HASH_LEN) {
            Some((end, _)) => &self.sha[..end],
            None => &self.sha,
        }
    }

    /// First line of the commit message.
    pub fn headline(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}

/// Response of `GET /repos/{account}/{repository}/commits/{sha}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetail {
    pub files: Vec<FileChange>,
}

/// A file touched by a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Blob sha, doubles as the row identifier.
    #[serde(rename = "sha")]
    pub id: String,
    pub filename: String,
    /// Server-side status string: `added`, `modified`, `removed`, `renamed`, ...
    pub status: String,
    pub additions: u32,
    pub deletions: u32,
    pub changes: u32,
}

// Raw shapes as they appear on the wire. Dates stay strings here and are
// parsed with the configured strategy in `api::decode`.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CommitSummaryWire {
    pub(crate) node_id: String,
    pub(crate) sha: String,
    pub(crate) commit: CommitInfoWire,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CommitInfoWire {
    pub(crate) author: PersonWire,
    pub(crate) committer: PersonWire,
    pub(crate) message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PersonWire {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) date: String,
}

impl From<PersonInfo> for PersonWire {
    fn from(person: PersonInfo) -> Self {
        Self {
            name: person.name,
            email: person.email,
            date: person.date.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

impl From<CommitSummary> for CommitSummaryWire {
    fn from(summary: CommitSummary) -> Self {
        Self {
            node_id: summary.id,
            sha: summary.sha,
            commit: CommitInfoWire {
                author: summary.author.into(),
                committer: summary.committer.into(),
                message: summary.message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn person(name: &str) -> PersonInfo {
        PersonInfo {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            date: Utc.with_ymd_and_hms(2021, 1, 18, 9, 30, 0).unwrap(),
        }
    }

    fn summary(sha: &str, message: &str) -> CommitSummary {
        CommitSummary {
            id: "MDY6Q29tbWl0MQ==".to_string(),
            sha: sha.to_string(),
            author: person("Mike"),
            committer: person("GitHub"),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_commit_hash_truncates() {
        let commit = summary("abcdef1234567", "init");
        assert_eq!(commit.commit_hash(), "abcdef1");
    }

    #[test]
    fn test_commit_hash_short_sha_untouched() {
        assert_eq!(summary("abc", "init").commit_hash(), "abc");
        assert_eq!(summary("abcdef1", "init").commit_hash(), "abcdef1");
        assert_eq!(summary("", "init").commit_hash(), "");
    }

    #[test]
    fn test_headline() {
        let commit = summary("abc", "Add settings view\n\nLets the user pick a repo.");
        assert_eq!(commit.headline(), "Add settings view");
        assert_eq!(summary("abc", "").headline(), "");
    }

    #[test]
    fn test_summary_serializes_to_api_shape() {
        let commit = summary("abcdef1234567", "init");
        let value = serde_json::to_value(&commit).unwrap();

        assert_eq!(value["node_id"], "MDY6Q29tbWl0MQ==");
        assert_eq!(value["sha"], "abcdef1234567");
        assert_eq!(value["commit"]["message"], "init");
        assert_eq!(value["commit"]["author"]["name"], "Mike");
        assert_eq!(value["commit"]["committer"]["date"], "2021-01-18T09:30:00Z");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_file_change_serialization() {
        let file = FileChange {
            id: "bbcd538c8e72b8c175046e27cc8f907076331401".to_string(),
            filename: "GitMyCommits/Models/RepoSettings.swift".to_string(),
            status: "added".to_string(),
            additions: 103,
            deletions: 21,
            changes: 124,
        };

        let json = serde_json::to_string(&file).unwrap();
        assert!(json.contains("\"sha\":\"bbcd538c8e72b8c175046e27cc8f907076331401\""));

        let parsed: FileChange = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, file);
    }

    #[test]
    fn test_file_change_rejects_negative_counts() {
        let json = r#"{"sha":"x","filename":"a","status":"modified","additions":-1,"deletions":0,"changes":0}"#;
        assert!(serde_json::from_str::<FileChange>(json).is_err());
    }

    #[test]
    fn test_coordinates_default_and_display() {
        let coords = RepositoryCoordinates::default();
        assert_eq!(coords.account, "mikenowakme");
        assert_eq!(coords.repository, "GitMyCommits");
        assert_eq!(coords.to_string(), "mikenowakme/GitMyCommits");
    }
}
