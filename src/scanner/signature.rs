//! Magic-byte signature scanner

use crate::types::SignatureResult;

/// One magic-byte pattern with its match offset
#[derive(Debug, Clone)]
struct SignaturePattern {
    pattern: &'static [u8],
    offset: usize,
    extension: &'static str,
    mime: &'static str,
}

/// Detects the binary type of a byte buffer from a fixed pattern table.
///
/// Patterns are evaluated in declaration order; the first hit wins. TIFF and
/// the ISO-BMFF brands need structural checks beyond a plain prefix and are
/// handled separately.
pub struct SignatureScanner {
    patterns: Vec<SignaturePattern>,
}

impl SignatureScanner {
    pub fn new() -> Self {
        let mut scanner = Self {
            patterns: Vec::new(),
        };
        scanner.load_default_patterns();
        scanner
    }

    fn load_default_patterns(&mut self) {
        self.add(b"\xFF\xD8\xFF", 0, "jpg", "image/jpeg");
        self.add(b"\x89PNG\r\n\x1a\n", 0, "png", "image/png");
        self.add(b"GIF87a", 0, "gif", "image/gif");
        self.add(b"GIF89a", 0, "gif", "image/gif");
        self.add(b"BM", 0, "bmp", "image/bmp");
        self.add(b"\x00\x00\x01\x00", 0, "ico", "image/x-icon");
        self.add(b"%PDF-", 0, "pdf", "application/pdf");
        // RIFF container; WEBP fourcc sits at offset 8
        self.add(b"WEBP", 8, "webp", "image/webp");
    }

    fn add(&mut self, pattern: &'static [u8], offset: usize, extension: &'static str, mime: &'static str) {
        self.patterns.push(SignaturePattern {
            pattern,
            offset,
            extension,
            mime,
        });
    }

    /// Returns the detected type, or `None` when the byte pattern is
    /// unrecognized.
    pub fn detect(&self, data: &[u8]) -> Option<SignatureResult> {
        for entry in &self.patterns {
            let end = entry.offset + entry.pattern.len();
            if data.len() >= end && &data[entry.offset..end] == entry.pattern {
                // RIFF fourcc check only counts when the outer header matches
                if entry.offset > 0 && !data.starts_with(b"RIFF") {
                    continue;
                }
                return Some(SignatureResult::new(entry.extension, entry.mime));
            }
        }

        if let Some(result) = Self::detect_tiff(data) {
            return Some(result);
        }
        Self::detect_bmff(data)
    }

    /// TIFF: `II*\0` (little-endian) or `MM\0*` (big-endian)
    fn detect_tiff(data: &[u8]) -> Option<SignatureResult> {
        if data.len() < 4 {
            return None;
        }
        let le = data[0] == 0x49 && data[1] == 0x49 && data[2] == 0x2A && data[3] == 0x00;
        let be = data[0] == 0x4D && data[1] == 0x4D && data[2] == 0x00 && data[3] == 0x2A;
        if le || be {
            Some(SignatureResult::new("tiff", "image/tiff"))
        } else {
            None
        }
    }

    /// ISO-BMFF: `ftyp` box at offset 4 with a HEIF/AVIF brand
    fn detect_bmff(data: &[u8]) -> Option<SignatureResult> {
        if data.len() < 12 || &data[4..8] != b"ftyp" {
            return None;
        }
        match &data[8..12] {
            b"heic" | b"heix" | b"hevc" | b"heim" | b"heis" => {
                Some(SignatureResult::new("heic", "image/heic"))
            }
            b"mif1" | b"msf1" => Some(SignatureResult::new("heif", "image/heif")),
            b"avif" | b"avis" => Some(SignatureResult::new("avif", "image/avif")),
            _ => None,
        }
    }
}

impl Default for SignatureScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(data: &[u8]) -> Option<SignatureResult> {
        SignatureScanner::new().detect(data)
    }

    #[test]
    fn detects_jpeg() {
        let result = detect(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]).unwrap();
        assert_eq!(result.extension, "jpg");
        assert_eq!(result.mime, "image/jpeg");
    }

    #[test]
    fn detects_png() {
        let result = detect(b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0DIHDR").unwrap();
        assert_eq!(result.extension, "png");
        assert_eq!(result.mime, "image/png");
    }

    #[test]
    fn detects_both_gif_variants() {
        assert_eq!(detect(b"GIF87a...").unwrap().extension, "gif");
        assert_eq!(detect(b"GIF89a...").unwrap().extension, "gif");
    }

    #[test]
    fn detects_webp_only_inside_riff() {
        let mut riff = Vec::from(&b"RIFF\x24\x00\x00\x00WEBP"[..]);
        riff.extend_from_slice(b"VP8 ");
        assert_eq!(detect(&riff).unwrap().extension, "webp");

        // WEBP fourcc without a RIFF header is not a match
        let fake = b"XXXX\x24\x00\x00\x00WEBPVP8 ";
        assert!(detect(fake).is_none());
    }

    #[test]
    fn detects_tiff_endianness_variants() {
        assert_eq!(detect(b"II\x2A\x00rest").unwrap().extension, "tiff");
        assert_eq!(detect(b"MM\x00\x2Arest").unwrap().extension, "tiff");
    }

    #[test]
    fn detects_heic_and_avif_brands() {
        let heic = b"\x00\x00\x00\x18ftypheic\x00\x00\x00\x00";
        assert_eq!(detect(heic).unwrap().extension, "heic");

        let avif = b"\x00\x00\x00\x18ftypavif\x00\x00\x00\x00";
        assert_eq!(detect(avif).unwrap().extension, "avif");
    }

    #[test]
    fn unknown_bytes_yield_none() {
        assert!(detect(b"plain text, no signature").is_none());
        assert!(detect(&[]).is_none());
        assert!(detect(&[0xFF]).is_none());
    }
}
