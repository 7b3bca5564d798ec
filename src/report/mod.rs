//! Forensic report data model
//!
//! The report is the sole output entity: five fixed sub-sections plus a
//! status/timestamp envelope. Field names are pinned to the wire format via
//! serde renames; every field has a defined fallback, so the serialized
//! schema never carries undefined or missing keys.

pub mod formatter;
pub mod responder;

pub use formatter::ReportFormatter;
pub use responder::ServiceResponse;

use serde::{Deserialize, Serialize};

/// Envelope status for a completed analysis
pub const STATUS_COMPLETE: &str = "Analysis Complete";

/// Timeline verdicts
pub const TIMELINE_CONSISTENT: &str = "Consistent";
pub const TIMELINE_ALTERED: &str = "Altered after creation";

/// Fallback sentinels
pub const UNKNOWN: &str = "Unknown";
pub const UNKNOWN_STRIPPED: &str = "Unknown (Metadata Stripped)";
pub const PRESENT_XMP: &str = "Present (XMP data found)";
pub const PRESENT_IPTC: &str = "Present (IPTC data found)";
pub const MISSING: &str = "Missing";

/// Complete per-request analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForensicReport {
    pub service: String,
    pub status: String,
    /// ISO-8601 generation time
    pub timestamp: String,
    pub file_integrity: FileIntegrity,
    pub device_fingerprint: DeviceFingerprint,
    pub provenance: Provenance,
    pub location_intel: LocationIntel,
    pub raw_tags: RawTags,
}

/// Declared-vs-detected type comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileIntegrity {
    pub declared_type: String,
    pub actual_type: String,
    pub mime: String,
    pub is_extension_spoofed: bool,
    pub file_size: usize,
}

/// Camera/device identity and editing-software fingerprint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceFingerprint {
    pub make: String,
    pub model: String,
    pub lens: String,
    pub serial_number: String,
    pub software: String,
    /// Name-fingerprint heuristic, not a guarantee; tools outside the known
    /// editor set produce false negatives.
    pub is_edited: bool,
}

/// Capture/digitize/modify timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub original_date: String,
    pub digitize_date: String,
    pub modify_date: String,
    pub timeline_status: String,
}

/// Embedded GPS intelligence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationIntel {
    #[serde(rename = "hasGPS")]
    pub has_gps: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub maps_link: Option<String>,
}

/// Presence flags only; raw blocks are never echoed so the report stays
/// bounded regardless of metadata payload volume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTags {
    pub extensible_metadata: String,
    pub press_metadata: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_with_pinned_wire_keys() {
        let report = ForensicReport {
            service: "Media Forensic Analysis".into(),
            status: STATUS_COMPLETE.into(),
            timestamp: "2023-01-01T00:00:00+00:00".into(),
            file_integrity: FileIntegrity {
                declared_type: "jpg".into(),
                actual_type: "png".into(),
                mime: "image/png".into(),
                is_extension_spoofed: true,
                file_size: 42,
            },
            device_fingerprint: DeviceFingerprint {
                make: UNKNOWN_STRIPPED.into(),
                model: UNKNOWN.into(),
                lens: UNKNOWN.into(),
                serial_number: UNKNOWN.into(),
                software: UNKNOWN.into(),
                is_edited: false,
            },
            provenance: Provenance {
                original_date: UNKNOWN.into(),
                digitize_date: UNKNOWN.into(),
                modify_date: UNKNOWN.into(),
                timeline_status: TIMELINE_CONSISTENT.into(),
            },
            location_intel: LocationIntel {
                has_gps: false,
                latitude: None,
                longitude: None,
                maps_link: None,
            },
            raw_tags: RawTags {
                extensible_metadata: MISSING.into(),
                press_metadata: MISSING.into(),
            },
        };

        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("fileIntegrity").is_some());
        assert!(value.get("deviceFingerprint").is_some());
        assert!(value.get("provenance").is_some());
        assert!(value.get("locationIntel").is_some());
        assert!(value.get("rawTags").is_some());
        assert_eq!(value["fileIntegrity"]["isExtensionSpoofed"], true);
        assert_eq!(value["fileIntegrity"]["declaredType"], "jpg");
        assert_eq!(value["locationIntel"]["hasGPS"], false);
        assert!(value["locationIntel"]["mapsLink"].is_null());
        assert_eq!(value["deviceFingerprint"]["serialNumber"], UNKNOWN);
        assert_eq!(value["rawTags"]["extensibleMetadata"], MISSING);
    }
}
