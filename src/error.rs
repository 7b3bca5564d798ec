//! Error types and handling for the media forensics pipeline

use std::result::Result as StdResult;

use thiserror::Error;

/// Custom result type for forensic operations
pub type Result<T> = StdResult<T, Error>;

/// Core error type for the analysis pipeline
///
/// Only `Input`, `Fetch` and `Internal` ever escalate to a failed response.
/// Metadata-parse problems are absorbed at the extractor boundary and never
/// surface through this type.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Invalid request: {0}")]
    Input(String),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Metadata error: {0}")]
    Metadata(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failures while retrieving the media bytes from the upstream host
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FetchError {
    #[error("Host unreachable: {0}")]
    Unreachable(String),

    #[error("Upstream responded with status {status}")]
    UpstreamStatus { status: u16 },

    #[error("Response body exceeds the configured limit of {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("Fetch timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

impl Error {
    /// Helper for wrapping any unexpected failure at the outermost boundary
    pub fn internal<E: std::fmt::Display>(e: E) -> Self {
        Error::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_message_carries_the_code() {
        let err = Error::from(FetchError::UpstreamStatus { status: 404 });
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn fetch_error_converts_into_core_error() {
        let err: Error = FetchError::Unreachable("dns failure".into()).into();
        assert!(matches!(err, Error::Fetch(_)));
    }
}
