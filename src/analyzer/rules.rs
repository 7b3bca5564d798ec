//! Prioritized rule chains used by the analyzer
//!
//! The software-resolution order and the editor fingerprint set are explicit
//! ordered tables rather than nested conditionals, so each rule can be
//! audited and tested on its own.

use lazy_static::lazy_static;

use crate::report::UNKNOWN;
use crate::types::{tags, MetadataBlock, MetadataBundle};

/// One entry of the software-resolution chain
pub struct SoftwareRule {
    /// Where the value comes from, for auditability
    pub source: &'static str,
    pub resolve: fn(&MetadataBundle) -> Option<String>,
}

fn text_of(block: &Option<MetadataBlock>, tag: &str) -> Option<String> {
    MetadataBundle::tag(block, tag)
        .filter(|value| !value.is_empty())
        .map(|value| value.display())
}

lazy_static! {
    /// Evaluated top to bottom; the first rule yielding a non-empty value
    /// wins.
    pub static ref SOFTWARE_RESOLUTION: Vec<SoftwareRule> = vec![
        SoftwareRule {
            source: "primaryImageDirectory/Software",
            resolve: |b| text_of(&b.primary_image_directory, tags::SOFTWARE),
        },
        SoftwareRule {
            source: "primaryImageDirectory/ProcessingSoftware",
            resolve: |b| text_of(&b.primary_image_directory, tags::PROCESSING_SOFTWARE),
        },
        SoftwareRule {
            source: "extensibleMetadata/CreatorTool",
            resolve: |b| text_of(&b.extensible_metadata, tags::CREATOR_TOOL),
        },
    ];
}

/// Editor names whose presence in the software tag flags the file as edited.
/// Matching is a case-sensitive substring check; tools outside this set are
/// not detected.
pub const EDITOR_FINGERPRINTS: &[&str] = &["Photoshop", "GIMP", "Lightroom"];

/// Resolves the editing-software value through the ordered chain
pub fn resolve_software(bundle: &MetadataBundle) -> String {
    SOFTWARE_RESOLUTION
        .iter()
        .find_map(|rule| (rule.resolve)(bundle))
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Name-fingerprint heuristic for editing software
pub fn is_edited(software: &str) -> bool {
    software != UNKNOWN && EDITOR_FINGERPRINTS.iter().any(|name| software.contains(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TagValue;

    fn bundle_with_ifd0(tag: &str, value: &str) -> MetadataBundle {
        let mut block = MetadataBlock::new();
        block.insert_text(tag, value);
        MetadataBundle {
            primary_image_directory: Some(block),
            ..Default::default()
        }
    }

    #[test]
    fn software_tag_wins_over_creator_tool() {
        let mut bundle = bundle_with_ifd0(tags::SOFTWARE, "Darktable 4.6");
        let mut xmp = MetadataBlock::new();
        xmp.insert_text(tags::CREATOR_TOOL, "Adobe Photoshop 2023");
        bundle.extensible_metadata = Some(xmp);

        assert_eq!(resolve_software(&bundle), "Darktable 4.6");
    }

    #[test]
    fn processing_software_beats_creator_tool() {
        let mut bundle = bundle_with_ifd0(tags::PROCESSING_SOFTWARE, "RawTherapee");
        let mut xmp = MetadataBlock::new();
        xmp.insert_text(tags::CREATOR_TOOL, "GIMP 2.10");
        bundle.extensible_metadata = Some(xmp);

        assert_eq!(resolve_software(&bundle), "RawTherapee");
    }

    #[test]
    fn creator_tool_is_the_last_resort() {
        let mut bundle = MetadataBundle::empty();
        let mut xmp = MetadataBlock::new();
        xmp.insert_text(tags::CREATOR_TOOL, "Lightroom Classic");
        bundle.extensible_metadata = Some(xmp);

        assert_eq!(resolve_software(&bundle), "Lightroom Classic");
    }

    #[test]
    fn empty_software_tag_falls_through_the_chain() {
        let mut bundle = bundle_with_ifd0(tags::SOFTWARE, "   ");
        let mut xmp = MetadataBlock::new();
        xmp.insert_text(tags::CREATOR_TOOL, "GIMP 2.10");
        bundle.extensible_metadata = Some(xmp);

        assert_eq!(resolve_software(&bundle), "GIMP 2.10");
    }

    #[test]
    fn unresolved_software_is_unknown() {
        assert_eq!(resolve_software(&MetadataBundle::empty()), UNKNOWN);
    }

    #[test]
    fn edited_iff_fingerprint_matches_case_sensitively() {
        assert!(is_edited("Adobe Photoshop 2023"));
        assert!(is_edited("GIMP 2.10.34"));
        assert!(is_edited("Adobe Lightroom 6.0"));
        assert!(!is_edited("adobe photoshop")); // lowercase does not match
        assert!(!is_edited("Capture One 23"));
        assert!(!is_edited(UNKNOWN));
    }

    #[test]
    fn non_date_number_tag_is_not_software() {
        let mut block = MetadataBlock::new();
        block.insert(tags::SOFTWARE, TagValue::Number(1.0));
        let bundle = MetadataBundle {
            primary_image_directory: Some(block),
            ..Default::default()
        };
        // Numbers render verbatim; the chain only skips empty text
        assert_eq!(resolve_software(&bundle), "1");
    }
}
