//! Error taxonomy for the fetch pipeline.
//!
//! Errors are `Clone` so a failed attempt can be stored in a published
//! [`FetchState`](crate::fetcher::FetchState) and handed to every subscriber.

use std::error::Error;
use std::sync::Arc;

/// Why a single fetch attempt failed. None of these are retried.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// Account, repository or sha was unusable before any request was built.
    #[error("invalid repository coordinates: {reason}")]
    InvalidCoordinates { reason: String },

    /// The HTTP call itself failed (DNS, connectivity, TLS, body read).
    #[error("request failed: {0}")]
    Transport(#[source] Arc<dyn Error + Send + Sync>),

    /// The server answered outside the 200-299 range.
    #[error("server responded with HTTP status {status_code}")]
    HttpStatus { status_code: u16 },

    /// A successful response declared something other than `application/json`.
    #[error("{}", unknown_mime_type(.content_type))]
    UnsupportedContentType { content_type: Option<String> },

    /// The body did not match the expected shape.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl FetchError {
    pub(crate) fn invalid_coordinates(reason: impl Into<String>) -> Self {
        Self::InvalidCoordinates {
            reason: reason.into(),
        }
    }

    /// Status code carried by an [`FetchError::HttpStatus`] failure.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status_code } => Some(*status_code),
            _ => None,
        }
    }
}

fn unknown_mime_type(content_type: &Option<String>) -> String {
    match content_type {
        Some(mime) => format!("Unknown mime type was returned: {}", mime),
        None => "Unknown mime type was returned.".to_string(),
    }
}

/// A JSON body that could not be turned into typed records.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed response body: {0}")]
    Json(#[source] Arc<serde_json::Error>),

    #[error("invalid date {value:?}, expected {expected}")]
    Date {
        value: String,
        expected: &'static str,
    },
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(Arc::new(err))
    }
}
