//! Marker-segment scans: XMP packet, IPTC, ICC profile, JFIF
//!
//! These blocks are located with bounded byte scans rather than full
//! container walks, which keeps the extractor tolerant of truncated or
//! oddly-wrapped files. Only the XMP packet is parsed further; the rest are
//! recorded as presence-only blocks.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::types::{tags, MetadataBlock};

const XMP_OPEN: &[u8] = b"<x:xmpmeta";
const XMP_CLOSE: &[u8] = b"</x:xmpmeta>";
const XPACKET_OPEN: &[u8] = b"<?xpacket begin";

/// Finds the XMP packet and, when present, pulls the `CreatorTool` field out
/// of it.
pub fn extract_xmp_block(data: &[u8]) -> Option<MetadataBlock> {
    let packet = find_xmp_packet(data)?;
    let mut block = MetadataBlock::new();
    if let Some(tool) = creator_tool(packet) {
        block.insert_text(tags::CREATOR_TOOL, tool);
    }
    Some(block)
}

/// IPTC rides in Photoshop 8BIM resource blocks
pub fn detect_press_block(data: &[u8]) -> Option<MetadataBlock> {
    if contains(data, b"Photoshop 3.0\x00") && contains(data, b"8BIM") {
        Some(MetadataBlock::new())
    } else {
        None
    }
}

pub fn detect_color_profile_block(data: &[u8]) -> Option<MetadataBlock> {
    if contains(data, b"ICC_PROFILE\x00") {
        Some(MetadataBlock::new())
    } else {
        None
    }
}

pub fn detect_jfif_block(data: &[u8]) -> Option<MetadataBlock> {
    if contains(data, b"JFIF\x00") {
        Some(MetadataBlock::new())
    } else {
        None
    }
}

fn find_xmp_packet(data: &[u8]) -> Option<&[u8]> {
    if let Some(start) = find(data, XMP_OPEN) {
        let rest = &data[start..];
        let end = find(rest, XMP_CLOSE).map(|e| e + XMP_CLOSE.len())?;
        return Some(&rest[..end]);
    }
    // Some writers omit the x:xmpmeta wrapper and emit a bare xpacket
    if let Some(start) = find(data, XPACKET_OPEN) {
        let rest = &data[start..];
        let end = find(rest, b"<?xpacket end").unwrap_or(rest.len());
        return Some(&rest[..end]);
    }
    None
}

/// Pulls `CreatorTool` out of the XMP XML. The field appears either as an
/// attribute on `rdf:Description` or as a child element; both are handled.
fn creator_tool(xml: &[u8]) -> Option<String> {
    let mut reader = Reader::from_reader(xml);
    reader.trim_text(true);

    let mut in_creator_tool = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref().ends_with(b"CreatorTool") {
                        if let Ok(value) = attr.unescape_value() {
                            let value = value.trim().to_string();
                            if !value.is_empty() {
                                return Some(value);
                            }
                        }
                    }
                }
                if e.name().as_ref().ends_with(b"CreatorTool") {
                    in_creator_tool = true;
                }
            }
            Ok(Event::Text(ref t)) if in_creator_tool => {
                if let Ok(text) = t.unescape() {
                    let text = text.trim().to_string();
                    if !text.is_empty() {
                        return Some(text);
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref().ends_with(b"CreatorTool") {
                    in_creator_tool = false;
                }
            }
            Ok(Event::Eof) | Err(_) => return None,
            _ => {}
        }
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    find(haystack, needle).is_some()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
