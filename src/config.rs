//! Configuration types and validation for the pipeline

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier reported in the response envelope
pub const SERVICE_NAME: &str = "Media Forensic Analysis";

/// Bounds for the single upstream fetch attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Hard cap on fetch duration, in seconds
    pub timeout_secs: u64,
    /// Hard cap on the response body size, in bytes
    pub max_body_bytes: usize,
    /// User-Agent header sent upstream
    pub user_agent: String,
}

/// Global pipeline execution config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub fetch: FetchConfig,
    /// Prefix of the fetched body handed to the XMP/IPTC byte scan
    pub metadata_scan_limit: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_body_bytes: 50 * 1024 * 1024, // 50 MB
            user_agent: format!("mfx/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            metadata_scan_limit: 2 * 1024 * 1024, // 2 MiB
        }
    }
}

impl ProcessingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.fetch.timeout_secs == 0 {
            return Err(Error::Input("Fetch timeout must be at least 1s".into()));
        }
        if self.fetch.max_body_bytes < 1024 {
            return Err(Error::Input("Fetch body limit too small".into()));
        }
        if self.metadata_scan_limit == 0 {
            return Err(Error::Input("Metadata scan limit must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ProcessingConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = ProcessingConfig::default();
        config.fetch.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
