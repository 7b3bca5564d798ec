//! Shared data types for the media forensics pipeline

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Well-known tag names used across metadata blocks
pub mod tags {
    pub const MAKE: &str = "Make";
    pub const MODEL: &str = "Model";
    pub const SOFTWARE: &str = "Software";
    pub const PROCESSING_SOFTWARE: &str = "ProcessingSoftware";
    pub const MODIFY_DATE: &str = "ModifyDate";
    pub const DATE_TIME_ORIGINAL: &str = "DateTimeOriginal";
    pub const CREATE_DATE: &str = "CreateDate";
    pub const LENS_MODEL: &str = "LensModel";
    pub const SERIAL_NUMBER: &str = "SerialNumber";
    pub const CREATOR_TOOL: &str = "CreatorTool";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
}

/// Best-guess binary type detected from magic bytes, independent of filename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureResult {
    pub extension: String,
    pub mime: String,
}

impl SignatureResult {
    pub fn new(extension: &str, mime: &str) -> Self {
        Self {
            extension: extension.to_string(),
            mime: mime.to_string(),
        }
    }
}

/// A single metadata tag value
///
/// Source libraries hand back a mix of representations for the same logical
/// field (dates as strings or typed values, coordinates as numbers), so the
/// pipeline keeps all three shapes and normalizes at comparison time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Text(String),
    Number(f64),
    Date(DateTime<Utc>),
}

impl TagValue {
    /// Renders the value the way it appears in the report
    pub fn display(&self) -> String {
        match self {
            TagValue::Text(s) => s.clone(),
            TagValue::Number(n) => n.to_string(),
            TagValue::Date(d) => d.to_rfc3339(),
        }
    }

    /// The numeric value, when this tag holds one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            TagValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Normalizes the value to a comparable instant.
    ///
    /// Malformed or non-date values yield `None`; they must never fail the
    /// report, so no error is produced here.
    pub fn as_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            TagValue::Date(d) => Some(*d),
            TagValue::Text(s) => parse_instant(s),
            TagValue::Number(_) => None,
        }
    }

    /// True when the value renders to an empty string
    pub fn is_empty(&self) -> bool {
        matches!(self, TagValue::Text(s) if s.trim().is_empty())
    }
}

/// Parses the date representations seen in the wild: EXIF's colon-separated
/// form, ISO-8601 with or without offset, and bare dates.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    const DATETIME_FORMATS: &[&str] = &[
        "%Y:%m:%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
    ];
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y:%m:%d"];
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

/// One parsed metadata block: tag name → tag value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataBlock {
    entries: BTreeMap<String, TagValue>,
}

impl MetadataBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: &str, value: TagValue) {
        self.entries.insert(tag.to_string(), value);
    }

    pub fn insert_text(&mut self, tag: &str, value: impl Into<String>) {
        self.insert(tag, TagValue::Text(value.into()));
    }

    pub fn get(&self, tag: &str) -> Option<&TagValue> {
        self.entries.get(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Parsed metadata blocks for one media file.
///
/// Any block, or the whole bundle, may legitimately be absent; transport
/// commonly strips metadata. A `None` block and a present-but-empty block are
/// kept distinguishable; the report collapses both to the same fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataBundle {
    pub primary_image_directory: Option<MetadataBlock>,
    pub capture_exif: Option<MetadataBlock>,
    pub gps: Option<MetadataBlock>,
    pub extensible_metadata: Option<MetadataBlock>,
    pub press_metadata: Option<MetadataBlock>,
    pub color_profile: Option<MetadataBlock>,
    pub jfif: Option<MetadataBlock>,
}

impl MetadataBundle {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Looks up a tag in an optional block
    pub fn tag<'a>(block: &'a Option<MetadataBlock>, name: &str) -> Option<&'a TagValue> {
        block.as_ref().and_then(|b| b.get(name))
    }

    /// True when no block was found at all
    pub fn is_empty(&self) -> bool {
        self.primary_image_directory.is_none()
            && self.capture_exif.is_none()
            && self.gps.is_none()
            && self.extensible_metadata.is_none()
            && self.press_metadata.is_none()
            && self.color_profile.is_none()
            && self.jfif.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_exif_style_datetime() {
        let parsed = parse_instant("2023:06:01 14:30:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2023-06-01T14:30:00+00:00");
    }

    #[test]
    fn parses_bare_date() {
        let parsed = parse_instant("2023-01-01").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2023-01-01T00:00:00+00:00");
    }

    #[test]
    fn rejects_garbage_dates_without_panicking() {
        assert!(parse_instant("not a date").is_none());
        assert!(parse_instant("").is_none());
        assert!(parse_instant("2023-13-45").is_none());
    }

    #[test]
    fn tag_value_instant_normalization() {
        let text = TagValue::Text("2023-06-01T00:00:00Z".into());
        let date = TagValue::Date(parse_instant("2023-06-01").unwrap());
        assert_eq!(text.as_instant(), date.as_instant());
        assert!(TagValue::Number(3.5).as_instant().is_none());
    }

    #[test]
    fn date_values_serialize_as_rfc3339_strings() {
        let value = TagValue::Date(parse_instant("2023-06-01").unwrap());
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, serde_json::json!("2023-06-01T00:00:00Z"));
    }

    #[test]
    fn absent_block_and_empty_block_are_distinct() {
        let mut bundle = MetadataBundle::empty();
        assert!(bundle.primary_image_directory.is_none());
        bundle.primary_image_directory = Some(MetadataBlock::new());
        let block = bundle.primary_image_directory.as_ref().unwrap();
        assert!(block.is_empty());
    }
}
