//! Per-entry failure record.

use std::fmt;

use crate::fetch::FetchError;

/// Why one entry could not be satisfied.
#[derive(Debug, thiserror::Error)]
pub enum EntryErrorCause {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("write failed: {0}")]
    Write(#[source] std::io::Error),
    /// The reference has no usable final path segment.
    #[error("no usable filename in reference")]
    InvalidFilename,
    /// The reference could not be resolved against the playlist URL.
    #[error("cannot resolve address: {0}")]
    InvalidAddress(#[from] url::ParseError),
}

/// A failed entry: its target as written in the playlist and the cause.
#[derive(Debug)]
pub struct EntryError {
    pub target: String,
    pub cause: EntryErrorCause,
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.target, self.cause)
    }
}

impl std::error::Error for EntryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}
