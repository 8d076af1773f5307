//! JSON bodies to typed records.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::models::{CommitDetail, CommitSummary, CommitSummaryWire, PersonInfo, PersonWire};

const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const ISO8601_LEN: usize = "2021-01-01T00:00:00Z".len();

/// Separator expected at each non-digit offset of `YYYY-MM-DDTHH:MM:SSZ`.
const ISO8601_SEPARATORS: [(usize, u8); 6] = [
    (4, b'-'),
    (7, b'-'),
    (10, b'T'),
    (13, b':'),
    (16, b':'),
    (19, b'Z'),
];

/// How `date` strings in commit payloads are parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateDecoding {
    /// `YYYY-MM-DDTHH:MM:SSZ` and nothing else. This is what GitHub sends.
    #[default]
    Iso8601,
    /// Any RFC 3339 timestamp: offsets and fractional seconds are accepted
    /// and normalized to UTC.
    Rfc3339,
}

impl DateDecoding {
    pub fn parse(self, raw: &str) -> Result<DateTime<Utc>, DecodeError> {
        match self {
            Self::Iso8601 => {
                // chrono tolerates space padding and signed years; reject
                // anything that is not exactly the zero-padded form first.
                if !is_iso8601_shape(raw) {
                    return Err(Self::invalid(raw, ISO8601_FORMAT));
                }
                NaiveDateTime::parse_from_str(raw, ISO8601_FORMAT)
                    .map(|naive| naive.and_utc())
                    .map_err(|_| Self::invalid(raw, ISO8601_FORMAT))
            }
            Self::Rfc3339 => DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| Self::invalid(raw, "an RFC 3339 timestamp")),
        }
    }

    fn invalid(raw: &str, expected: &'static str) -> DecodeError {
        DecodeError::Date {
            value: raw.to_string(),
            expected,
        }
    }
}

fn is_iso8601_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == ISO8601_LEN
        && bytes.iter().enumerate().all(|(i, &b)| {
            match ISO8601_SEPARATORS.iter().find(|(pos, _)| *pos == i) {
                Some(&(_, sep)) => b == sep,
                None => b.is_ascii_digit(),
            }
        })
}

/// Decode the body of the commit list endpoint. An empty array is fine.
pub fn commit_summaries(
    body: &[u8],
    dates: DateDecoding,
) -> Result<Vec<CommitSummary>, DecodeError> {
    let raw: Vec<CommitSummaryWire> = serde_json::from_slice(body)?;
    raw.into_iter().map(|c| summary(c, dates)).collect()
}

/// Decode the body of the single commit endpoint.
pub fn commit_detail(body: &[u8]) -> Result<CommitDetail, DecodeError> {
    Ok(serde_json::from_slice(body)?)
}

fn summary(raw: CommitSummaryWire, dates: DateDecoding) -> Result<CommitSummary, DecodeError> {
    Ok(CommitSummary {
        id: raw.node_id,
        sha: raw.sha,
        author: person(raw.commit.author, dates)?,
        committer: person(raw.commit.committer, dates)?,
        message: raw.commit.message,
    })
}

fn person(raw: PersonWire, dates: DateDecoding) -> Result<PersonInfo, DecodeError> {
    Ok(PersonInfo {
        date: dates.parse(&raw.date)?,
        name: raw.name,
        email: raw.email,
    })
}
