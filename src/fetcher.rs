//! Media fetch collaborator
//!
//! Retrieves the raw bytes behind a locator. One attempt per request, no
//! retries; duration and body size are bounded by configuration.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::config::FetchConfig;
use crate::error::{Error, FetchError, Result};

/// Seam for the byte-retrieval collaborator
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    async fn fetch(&self, locator: &str) -> std::result::Result<Vec<u8>, FetchError>;
}

/// reqwest-backed fetcher
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout_secs: u64,
    max_body_bytes: usize,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(Error::internal)?;

        Ok(Self {
            client,
            timeout_secs: config.timeout_secs,
            max_body_bytes: config.max_body_bytes,
        })
    }
}

#[async_trait]
impl MediaFetcher for HttpFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, locator: &str) -> std::result::Result<Vec<u8>, FetchError> {
        let mut response = self.client.get(locator).send().await.map_err(|err| {
            if err.is_timeout() {
                FetchError::Timeout {
                    seconds: self.timeout_secs,
                }
            } else {
                FetchError::Unreachable(err.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, locator, "upstream refused the fetch");
            return Err(FetchError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        // Reject on the advertised length before pulling anything
        if let Some(length) = response.content_length() {
            if length as usize > self.max_body_bytes {
                return Err(FetchError::BodyTooLarge {
                    limit: self.max_body_bytes,
                });
            }
        }

        // Chunked or lying upstreams are cut off as soon as the cap is crossed
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|err| FetchError::Unreachable(err.to_string()))?
        {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(FetchError::BodyTooLarge {
                    limit: self.max_body_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        debug!(locator, bytes = body.len(), "media fetched");
        Ok(body)
    }
}
