//! Forensic analyzer, the decision core of the pipeline
//!
//! Turns the declared name, the detected binary signature, and the parsed
//! metadata blocks into a single structured tamper-assessment report. Pure
//! and deterministic given its inputs (envelope timestamp aside); every input
//! is optional and every output field has a defined fallback, so analysis
//! itself never fails. All fallibility lives in the collaborators.

pub mod rules;

use chrono::Utc;
use tracing::debug;

use crate::config::SERVICE_NAME;
use crate::report::{
    DeviceFingerprint, FileIntegrity, ForensicReport, LocationIntel, Provenance, RawTags,
    MISSING, PRESENT_IPTC, PRESENT_XMP, STATUS_COMPLETE, TIMELINE_ALTERED, TIMELINE_CONSISTENT,
    UNKNOWN, UNKNOWN_STRIPPED,
};
use crate::types::{tags, MetadataBlock, MetadataBundle, SignatureResult, TagValue};

pub struct ForensicAnalyzer;

impl ForensicAnalyzer {
    /// Produces the complete report for one request.
    ///
    /// `file_size` is the raw byte length of the fetched media, passed
    /// through into the integrity section.
    pub fn analyze(
        locator: &str,
        signature: Option<&SignatureResult>,
        bundle: &MetadataBundle,
        file_size: usize,
    ) -> ForensicReport {
        debug!(locator, file_size, signature_detected = signature.is_some(), "analyzing media");

        ForensicReport {
            service: SERVICE_NAME.to_string(),
            status: STATUS_COMPLETE.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            file_integrity: Self::integrity(locator, signature, file_size),
            device_fingerprint: Self::device_fingerprint(bundle),
            provenance: Self::provenance(bundle),
            location_intel: Self::location(bundle),
            raw_tags: Self::raw_tags(bundle),
        }
    }

    /// Declared-vs-detected comparison.
    ///
    /// The spoof check deliberately compares the full lowercased locator via
    /// suffix match rather than reusing `declared_type`; the slight
    /// redundancy is part of the contract and pinned by tests.
    fn integrity(
        locator: &str,
        signature: Option<&SignatureResult>,
        file_size: usize,
    ) -> FileIntegrity {
        let declared_type = declared_extension(locator);
        let (actual_type, mime) = match signature {
            Some(sig) => (sig.extension.clone(), sig.mime.clone()),
            None => ("unknown".to_string(), "unknown".to_string()),
        };
        let is_extension_spoofed = match signature {
            Some(sig) => !locator
                .to_lowercase()
                .ends_with(&format!(".{}", sig.extension)),
            // Cannot assert spoofing without a detected type
            None => false,
        };

        FileIntegrity {
            declared_type,
            actual_type,
            mime,
            is_extension_spoofed,
            file_size,
        }
    }

    fn device_fingerprint(bundle: &MetadataBundle) -> DeviceFingerprint {
        let software = rules::resolve_software(bundle);
        let is_edited = rules::is_edited(&software);

        DeviceFingerprint {
            make: tag_or(&bundle.primary_image_directory, tags::MAKE, UNKNOWN_STRIPPED),
            model: tag_or(&bundle.primary_image_directory, tags::MODEL, UNKNOWN),
            lens: tag_or(&bundle.capture_exif, tags::LENS_MODEL, UNKNOWN),
            serial_number: tag_or(&bundle.capture_exif, tags::SERIAL_NUMBER, UNKNOWN),
            software,
            is_edited,
        }
    }

    fn provenance(bundle: &MetadataBundle) -> Provenance {
        let original = MetadataBundle::tag(&bundle.capture_exif, tags::DATE_TIME_ORIGINAL);
        let digitized = MetadataBundle::tag(&bundle.capture_exif, tags::CREATE_DATE);
        let modified = MetadataBundle::tag(&bundle.primary_image_directory, tags::MODIFY_DATE);

        Provenance {
            original_date: verbatim_or_unknown(original),
            digitize_date: verbatim_or_unknown(digitized),
            modify_date: verbatim_or_unknown(modified),
            timeline_status: Self::timeline_status(original, modified).to_string(),
        }
    }

    /// "Altered after creation" only when both instants parse and the modify
    /// time is strictly later. A missing or malformed date is not itself
    /// evidence of alteration.
    fn timeline_status(original: Option<&TagValue>, modified: Option<&TagValue>) -> &'static str {
        match (
            original.and_then(TagValue::as_instant),
            modified.and_then(TagValue::as_instant),
        ) {
            (Some(created), Some(changed)) if changed > created => TIMELINE_ALTERED,
            _ => TIMELINE_CONSISTENT,
        }
    }

    fn location(bundle: &MetadataBundle) -> LocationIntel {
        let latitude = MetadataBundle::tag(&bundle.gps, tags::LATITUDE).and_then(TagValue::as_number);
        let longitude =
            MetadataBundle::tag(&bundle.gps, tags::LONGITUDE).and_then(TagValue::as_number);

        // Latitude presence drives the flag; the link needs both components
        // and never invents a missing one
        let has_gps = latitude.is_some();
        let maps_link = latitude
            .zip(longitude)
            .map(|(lat, lon)| format!("https://www.google.com/maps?q={},{}", lat, lon));

        LocationIntel {
            has_gps,
            latitude,
            longitude,
            maps_link,
        }
    }

    fn raw_tags(bundle: &MetadataBundle) -> RawTags {
        RawTags {
            extensible_metadata: presence(&bundle.extensible_metadata, PRESENT_XMP),
            press_metadata: presence(&bundle.press_metadata, PRESENT_IPTC),
        }
    }
}

/// Lowercased substring after the final `.`; a locator with no dot yields the
/// whole lowercased string. That boundary case is part of the contract.
fn declared_extension(locator: &str) -> String {
    locator
        .rsplit('.')
        .next()
        .unwrap_or(locator)
        .to_lowercase()
}

fn tag_or(block: &Option<MetadataBlock>, tag: &str, fallback: &str) -> String {
    MetadataBundle::tag(block, tag)
        .filter(|value| !value.is_empty())
        .map(|value| value.display())
        .unwrap_or_else(|| fallback.to_string())
}

fn verbatim_or_unknown(value: Option<&TagValue>) -> String {
    value.map(|v| v.display()).unwrap_or_else(|| UNKNOWN.to_string())
}

fn presence(block: &Option<MetadataBlock>, present: &str) -> String {
    if block.is_some() {
        present.to_string()
    } else {
        MISSING.to_string()
    }
}
