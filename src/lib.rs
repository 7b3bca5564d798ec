//! Forensic inspection of remotely fetched media files
//!
//! Verifies a file's true binary type against its claimed extension, extracts
//! embedded metadata (device tags, software provenance, timestamps, GPS), and
//! applies tamper heuristics (extension spoofing, editor fingerprints,
//! timeline inconsistencies) into a single structured report.
//!
//! Data flow: locator → fetcher → bytes → {signature scanner, metadata
//! extractor} → forensic analyzer → responder.

// Configuration and core pipeline
pub mod config;
pub mod error;
pub mod pipeline;
pub mod service;
pub mod types;

// Collaborators: fetch, signature detection, metadata extraction
pub mod extractor;
pub mod fetcher;
pub mod scanner;

// The decision core and its output
pub mod analyzer;
pub mod report;

// Shared utilities
pub mod utils;

// Re-exports for crate consumers
pub use analyzer::ForensicAnalyzer;
pub use config::{FetchConfig, ProcessingConfig};
pub use error::{Error, FetchError, Result};
pub use extractor::{EmbeddedMetadataExtractor, MetadataExtractor};
pub use fetcher::{HttpFetcher, MediaFetcher};
pub use pipeline::Pipeline;
pub use report::{ForensicReport, ReportFormatter, ServiceResponse};
pub use scanner::SignatureScanner;
pub use service::{AnalyzeRequest, MediaForensicsService, RequestMethod};
pub use types::{MetadataBlock, MetadataBundle, SignatureResult, TagValue};
