//! EXIF container parsing via kamadak-exif
//!
//! Fills the primary image directory, capture EXIF, and GPS blocks. Tag names
//! follow the conventional exiftool spelling (`ModifyDate` for TIFF tag
//! 0x0132, `CreateDate` for `DateTimeDigitized`).

use std::io::Cursor;

use exif::{Context, In, Tag, Value};
use tracing::debug;

use crate::types::{tags, MetadataBlock, TagValue};

/// TIFF tag 0x000b; not in kamadak-exif's named tag table
const PROCESSING_SOFTWARE: Tag = Tag(Context::Tiff, 0x000b);

/// The three EXIF-derived blocks of a bundle
#[derive(Debug, Default)]
pub struct ExifBlocks {
    pub primary_image_directory: Option<MetadataBlock>,
    pub capture_exif: Option<MetadataBlock>,
    pub gps: Option<MetadataBlock>,
}

/// Reads the EXIF container (JPEG/TIFF/PNG/WebP/HEIF) out of `data`.
///
/// A missing or malformed container is not an error; it produces absent
/// blocks so the report falls back to its sentinels.
pub fn extract_exif_blocks(data: &[u8]) -> ExifBlocks {
    let mut cursor = Cursor::new(data);
    let parsed = match exif::Reader::new().read_from_container(&mut cursor) {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!(error = %err, "no EXIF container found");
            return ExifBlocks::default();
        }
    };

    let mut blocks = ExifBlocks::default();

    // A successful container read implies IFD0 exists, even when none of the
    // probed tags are set; that keeps block-absent and tag-absent distinct.
    let mut primary = MetadataBlock::new();
    copy_text(&parsed, Tag::Make, tags::MAKE, &mut primary);
    copy_text(&parsed, Tag::Model, tags::MODEL, &mut primary);
    copy_text(&parsed, Tag::Software, tags::SOFTWARE, &mut primary);
    copy_text(&parsed, PROCESSING_SOFTWARE, tags::PROCESSING_SOFTWARE, &mut primary);
    copy_text(&parsed, Tag::DateTime, tags::MODIFY_DATE, &mut primary);
    blocks.primary_image_directory = Some(primary);

    let mut capture = MetadataBlock::new();
    copy_text(&parsed, Tag::DateTimeOriginal, tags::DATE_TIME_ORIGINAL, &mut capture);
    copy_text(&parsed, Tag::DateTimeDigitized, tags::CREATE_DATE, &mut capture);
    copy_text(&parsed, Tag::LensModel, tags::LENS_MODEL, &mut capture);
    copy_text(&parsed, Tag::BodySerialNumber, tags::SERIAL_NUMBER, &mut capture);
    if !capture.is_empty() {
        blocks.capture_exif = Some(capture);
    }

    let mut gps = MetadataBlock::new();
    if let Some(lat) = decimal_coordinate(&parsed, Tag::GPSLatitude, Tag::GPSLatitudeRef, 'S') {
        gps.insert(tags::LATITUDE, TagValue::Number(lat));
    }
    if let Some(lon) = decimal_coordinate(&parsed, Tag::GPSLongitude, Tag::GPSLongitudeRef, 'W') {
        gps.insert(tags::LONGITUDE, TagValue::Number(lon));
    }
    if !gps.is_empty() {
        blocks.gps = Some(gps);
    }

    blocks
}

fn copy_text(parsed: &exif::Exif, tag: Tag, name: &str, block: &mut MetadataBlock) {
    if let Some(field) = parsed.get_field(tag, In::PRIMARY) {
        // ASCII values render wrapped in quotes
        let rendered = field.display_value().to_string();
        let rendered = rendered.trim_matches('"');
        if !rendered.trim().is_empty() {
            block.insert_text(name, rendered.to_string());
        }
    }
}

/// Converts a DMS rational triple plus its hemisphere reference into signed
/// decimal degrees.
fn decimal_coordinate(
    parsed: &exif::Exif,
    value_tag: Tag,
    ref_tag: Tag,
    negative_ref: char,
) -> Option<f64> {
    let field = parsed.get_field(value_tag, In::PRIMARY)?;
    let degrees = match &field.value {
        Value::Rational(parts) if parts.len() >= 3 => {
            parts[0].to_f64() + parts[1].to_f64() / 60.0 + parts[2].to_f64() / 3600.0
        }
        _ => return None,
    };

    let reference = parsed
        .get_field(ref_tag, In::PRIMARY)
        .map(|f| f.display_value().to_string())
        .unwrap_or_default();

    if reference.contains(negative_ref) {
        Some(-degrees)
    } else {
        Some(degrees)
    }
}
