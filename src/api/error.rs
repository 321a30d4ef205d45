//! Errors produced by the request client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One entry of the server's `{ "list": [{ "msg": ... }] }` error body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub msg: String,
    /// Anything else the server attached (field names, codes).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ErrorEntry {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            extra: serde_json::Map::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    list: Vec<ErrorEntry>,
}

/// Errors that can occur while talking to the account API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Network-level failure (DNS, connect, timeout, broken body)
    #[error("Request to '{url}' failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("Request rejected with status {status}: {}", summarize(.list))]
    Rejected { status: u16, list: Vec<ErrorEntry> },

    /// Success response whose body did not match the expected shape
    #[error("Failed to decode response (status {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

fn summarize(list: &[ErrorEntry]) -> String {
    list.iter()
        .map(|entry| entry.msg.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ApiError {
    /// Build a `Rejected` error from a raw response body.
    ///
    /// Bodies that are not in `{ list: [...] }` form fall back to a single
    /// entry holding the status reason phrase (e.g. "Unauthorized").
    pub fn rejected(status: reqwest::StatusCode, body: &[u8]) -> Self {
        let list = match serde_json::from_slice::<ErrorBody>(body) {
            Ok(parsed) if !parsed.list.is_empty() => parsed.list,
            _ => vec![ErrorEntry::new(
                status.canonical_reason().unwrap_or("Unknown error"),
            )],
        };
        ApiError::Rejected {
            status: status.as_u16(),
            list,
        }
    }

    /// First server-provided message, if the server rejected the request.
    pub fn first_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { list, .. } => list.first().map(|entry| entry.msg.as_str()),
            _ => None,
        }
    }

    /// True when the first server message equals `expected`, ignoring case.
    pub fn message_is(&self, expected: &str) -> bool {
        self.first_message()
            .is_some_and(|msg| msg.trim().to_lowercase() == expected.to_lowercase())
    }

    /// HTTP status, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } | ApiError::Decode { status, .. } => Some(*status),
            ApiError::Client(_) | ApiError::Connection { .. } => None,
        }
    }
}
