//! Plain-text report rendering for the CLI

use crate::report::ForensicReport;

pub struct ReportFormatter;

impl ReportFormatter {
    pub fn format_as_text(report: &ForensicReport) -> String {
        let mut content = String::new();
        content.push_str("Media Forensic Analysis Report\n");
        content.push_str("==============================\n\n");
        content.push_str(&format!("Generated: {}\n\n", report.timestamp));

        content.push_str("File Integrity:\n");
        content.push_str(&format!("- Declared type: {}\n", report.file_integrity.declared_type));
        content.push_str(&format!("- Actual type:   {}\n", report.file_integrity.actual_type));
        content.push_str(&format!("- MIME:          {}\n", report.file_integrity.mime));
        content.push_str(&format!(
            "- Extension spoofed: {}\n",
            report.file_integrity.is_extension_spoofed
        ));
        content.push_str(&format!("- File size: {} bytes\n\n", report.file_integrity.file_size));

        content.push_str("Device Fingerprint:\n");
        content.push_str(&format!("- Make:     {}\n", report.device_fingerprint.make));
        content.push_str(&format!("- Model:    {}\n", report.device_fingerprint.model));
        content.push_str(&format!("- Lens:     {}\n", report.device_fingerprint.lens));
        content.push_str(&format!("- Serial:   {}\n", report.device_fingerprint.serial_number));
        content.push_str(&format!("- Software: {}\n", report.device_fingerprint.software));
        content.push_str(&format!("- Edited:   {}\n\n", report.device_fingerprint.is_edited));

        content.push_str("Provenance:\n");
        content.push_str(&format!("- Original date: {}\n", report.provenance.original_date));
        content.push_str(&format!("- Digitize date: {}\n", report.provenance.digitize_date));
        content.push_str(&format!("- Modify date:   {}\n", report.provenance.modify_date));
        content.push_str(&format!("- Timeline:      {}\n\n", report.provenance.timeline_status));

        content.push_str("Location:\n");
        content.push_str(&format!("- GPS present: {}\n", report.location_intel.has_gps));
        if let (Some(lat), Some(lon)) = (report.location_intel.latitude, report.location_intel.longitude) {
            content.push_str(&format!("- Coordinates: {}, {}\n", lat, lon));
        }
        if let Some(link) = &report.location_intel.maps_link {
            content.push_str(&format!("- Map: {}\n", link));
        }
        content.push('\n');

        content.push_str("Raw Tags:\n");
        content.push_str(&format!("- XMP:  {}\n", report.raw_tags.extensible_metadata));
        content.push_str(&format!("- IPTC: {}\n", report.raw_tags.press_metadata));

        content
    }
}
