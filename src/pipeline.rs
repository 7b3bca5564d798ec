//! Request pipeline: fetch, inspect, analyze
//!
//! One linear pass per request: the fetch must complete first, then signature
//! detection and metadata extraction run concurrently (they are mutually
//! independent and the analyzer composes their outputs order-agnostically).
//! Each request owns its byte buffer and report; nothing is shared or kept.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::analyzer::ForensicAnalyzer;
use crate::config::ProcessingConfig;
use crate::error::Result;
use crate::extractor::{EmbeddedMetadataExtractor, MetadataExtractor};
use crate::fetcher::{HttpFetcher, MediaFetcher};
use crate::report::ForensicReport;
use crate::scanner::SignatureScanner;

pub struct Pipeline {
    fetcher: Arc<dyn MediaFetcher>,
    scanner: SignatureScanner,
    extractor: Arc<dyn MetadataExtractor>,
}

impl Pipeline {
    /// Builds the default pipeline with the HTTP fetcher
    pub fn new(config: ProcessingConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = Arc::new(HttpFetcher::new(&config.fetch)?);
        Ok(Self::with_collaborators(
            fetcher,
            Arc::new(EmbeddedMetadataExtractor::new(config.metadata_scan_limit)),
        ))
    }

    /// Injection point for tests and alternative collaborators
    pub fn with_collaborators(
        fetcher: Arc<dyn MediaFetcher>,
        extractor: Arc<dyn MetadataExtractor>,
    ) -> Self {
        Self {
            fetcher,
            scanner: SignatureScanner::new(),
            extractor,
        }
    }

    /// Runs the full analysis for one locator
    #[instrument(skip(self))]
    pub async fn execute(&self, locator: &str) -> Result<ForensicReport> {
        let bytes = self.fetcher.fetch(locator).await?;
        info!(locator, bytes = bytes.len(), "media retrieved, inspecting");

        let (signature, bundle) = tokio::join!(
            async { self.scanner.detect(&bytes) },
            self.extractor.extract(&bytes),
        );

        let report = ForensicAnalyzer::analyze(locator, signature.as_ref(), &bundle, bytes.len());
        info!(
            locator,
            spoofed = report.file_integrity.is_extension_spoofed,
            edited = report.device_fingerprint.is_edited,
            timeline = %report.provenance.timeline_status,
            "analysis complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::types::MetadataBundle;
    use async_trait::async_trait;

    struct StaticFetcher(Vec<u8>);

    #[async_trait]
    impl MediaFetcher for StaticFetcher {
        async fn fetch(&self, _locator: &str) -> std::result::Result<Vec<u8>, FetchError> {
            Ok(self.0.clone())
        }
    }

    struct FailingFetcher(u16);

    #[async_trait]
    impl MediaFetcher for FailingFetcher {
        async fn fetch(&self, _locator: &str) -> std::result::Result<Vec<u8>, FetchError> {
            Err(FetchError::UpstreamStatus { status: self.0 })
        }
    }

    struct EmptyExtractor;

    #[async_trait]
    impl MetadataExtractor for EmptyExtractor {
        async fn extract(&self, _data: &[u8]) -> MetadataBundle {
            MetadataBundle::empty()
        }
    }

    #[tokio::test]
    async fn spoofed_png_served_as_jpg_is_reported() {
        let png = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0DIHDR".to_vec();
        let pipeline =
            Pipeline::with_collaborators(Arc::new(StaticFetcher(png)), Arc::new(EmptyExtractor));

        let report = pipeline.execute("https://cdn.example/photo.jpg").await.unwrap();
        assert_eq!(report.file_integrity.declared_type, "jpg");
        assert_eq!(report.file_integrity.actual_type, "png");
        assert!(report.file_integrity.is_extension_spoofed);
        assert_eq!(report.file_integrity.file_size, 16);
    }

    #[tokio::test]
    async fn fetch_failure_propagates() {
        let pipeline = Pipeline::with_collaborators(
            Arc::new(FailingFetcher(404)),
            Arc::new(EmptyExtractor),
        );
        let err = pipeline.execute("https://cdn.example/gone.jpg").await.unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn metadata_absence_still_succeeds() {
        let pipeline = Pipeline::with_collaborators(
            Arc::new(StaticFetcher(b"no signature here".to_vec())),
            Arc::new(EmptyExtractor),
        );
        let report = pipeline.execute("https://cdn.example/blob").await.unwrap();
        assert_eq!(report.file_integrity.actual_type, "unknown");
        assert!(!report.file_integrity.is_extension_spoofed);
    }
}
