//! Embedded metadata extraction
//!
//! Parses the metadata blocks a media file may carry: the primary image
//! directory (IFD0), the capture EXIF sub-directory, the GPS block, the XMP
//! packet, and the IPTC/ICC/JFIF marker segments. Extraction never fails the
//! request; a file with no recognizable metadata container simply yields an
//! empty bundle.

pub mod exif;
pub mod xmp;

use async_trait::async_trait;
use tracing::debug;

use crate::types::MetadataBundle;

/// Seam for the metadata-extraction collaborator
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    async fn extract(&self, data: &[u8]) -> MetadataBundle;
}

/// Default extractor combining the EXIF container read with bounded byte
/// scans for the marker-based blocks.
pub struct EmbeddedMetadataExtractor {
    /// Prefix of the buffer handed to the XMP/IPTC/ICC/JFIF scans
    scan_limit: usize,
}

impl EmbeddedMetadataExtractor {
    pub fn new(scan_limit: usize) -> Self {
        Self { scan_limit }
    }
}

#[async_trait]
impl MetadataExtractor for EmbeddedMetadataExtractor {
    async fn extract(&self, data: &[u8]) -> MetadataBundle {
        let mut bundle = MetadataBundle::empty();

        let blocks = exif::extract_exif_blocks(data);
        bundle.primary_image_directory = blocks.primary_image_directory;
        bundle.capture_exif = blocks.capture_exif;
        bundle.gps = blocks.gps;

        let scan = &data[..data.len().min(self.scan_limit)];
        bundle.extensible_metadata = xmp::extract_xmp_block(scan);
        bundle.press_metadata = xmp::detect_press_block(scan);
        bundle.color_profile = xmp::detect_color_profile_block(scan);
        bundle.jfif = xmp::detect_jfif_block(scan);

        if bundle.is_empty() {
            debug!("no metadata blocks found; continuing with empty bundle");
        }
        bundle
    }
}
