use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

pub const SNIFF_LEN: usize = 261;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Jpeg,
    Jpeg2000,
    Png,
    Gif,
    Webp,
    Cr2,
    Tiff,
    Bmp,
    Jxr,
    Psd,
    Ico,
    Heif,
    Avif,
}

impl ImageKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Jpeg => "JPEG",
            Self::Jpeg2000 => "JPEG 2000",
            Self::Png => "PNG",
            Self::Gif => "GIF",
            Self::Webp => "WebP",
            Self::Cr2 => "CR2",
            Self::Tiff => "TIFF",
            Self::Bmp => "BMP",
            Self::Jxr => "JPEG XR",
            Self::Psd => "PSD",
            Self::Ico => "ICO",
            Self::Heif => "HEIF",
            Self::Avif => "AVIF",
        }
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn detect_image(head: &[u8]) -> Option<ImageKind> {
    if head.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some(ImageKind::Jpeg);
    }
    if head.len() > 12
        && head.starts_with(&[
            0x00, 0x00, 0x00, 0x0C, 0x6A, 0x50, 0x20, 0x20, 0x0D, 0x0A, 0x87, 0x0A,
        ])
        && head[12] == 0x00
    {
        return Some(ImageKind::Jpeg2000);
    }
    if head.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return Some(ImageKind::Png);
    }
    if head.starts_with(b"GIF") {
        return Some(ImageKind::Gif);
    }
    if head.len() >= 12 && head.starts_with(b"RIFF") && &head[8..12] == b"WEBP" {
        return Some(ImageKind::Webp);
    }

    let tiff_header = head.starts_with(b"II*\0") || head.starts_with(b"MM\0*");
    if tiff_header && head.len() > 9 && head[8] == b'C' && head[9] == b'R' {
        return Some(ImageKind::Cr2);
    }
    if tiff_header {
        return Some(ImageKind::Tiff);
    }

    if head.starts_with(b"BM") {
        return Some(ImageKind::Bmp);
    }
    if head.starts_with(&[0x49, 0x49, 0xBC]) {
        return Some(ImageKind::Jxr);
    }
    if head.starts_with(b"8BPS") {
        return Some(ImageKind::Psd);
    }
    if head.starts_with(&[0x00, 0x00, 0x01, 0x00]) {
        return Some(ImageKind::Ico);
    }

    detect_iso_bmff(head)
}

pub fn is_image(head: &[u8]) -> bool {
    detect_image(head).is_some()
}

pub fn read_head(path: &Path) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut head = Vec::with_capacity(SNIFF_LEN);
    file.take(SNIFF_LEN as u64).read_to_end(&mut head)?;
    Ok(head)
}

// HEIF family: `ftyp` box with the major brand at offset 8.
fn detect_iso_bmff(head: &[u8]) -> Option<ImageKind> {
    if head.len() < 12 || &head[4..8] != b"ftyp" {
        return None;
    }
    match &head[8..12] {
        b"heic" | b"heix" | b"hevc" | b"hevx" | b"heim" | b"heis" | b"mif1" | b"msf1" => {
            Some(ImageKind::Heif)
        }
        b"avif" | b"avis" => Some(ImageKind::Avif),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn padded(prefix: &[u8]) -> Vec<u8> {
        let mut bytes = prefix.to_vec();
        bytes.resize(32, 0);
        bytes
    }

    #[test]
    fn detects_common_formats() {
        assert_eq!(
            detect_image(&padded(&[0xFF, 0xD8, 0xFF, 0xE1])),
            Some(ImageKind::Jpeg)
        );
        assert_eq!(
            detect_image(&padded(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])),
            Some(ImageKind::Png)
        );
        assert_eq!(detect_image(&padded(b"GIF89a")), Some(ImageKind::Gif));
        assert_eq!(
            detect_image(&padded(b"RIFF\x10\x00\x00\x00WEBPVP8 ")),
            Some(ImageKind::Webp)
        );
        assert_eq!(detect_image(&padded(b"BM")), Some(ImageKind::Bmp));
    }

    #[test]
    fn cr2_is_distinguished_from_tiff() {
        assert_eq!(
            detect_image(&padded(b"II*\0\x10\0\0\0CR\x02\0")),
            Some(ImageKind::Cr2)
        );
        assert_eq!(
            detect_image(&padded(b"II*\0\x08\0\0\0")),
            Some(ImageKind::Tiff)
        );
        assert_eq!(
            detect_image(&padded(b"MM\0*\0\0\0\x08")),
            Some(ImageKind::Tiff)
        );
    }

    #[test]
    fn heif_and_avif_brands() {
        assert_eq!(
            detect_image(&padded(b"\0\0\0\x18ftypheic")),
            Some(ImageKind::Heif)
        );
        assert_eq!(
            detect_image(&padded(b"\0\0\0\x1cftypavif")),
            Some(ImageKind::Avif)
        );
        assert_eq!(detect_image(&padded(b"\0\0\0\x18ftypisom")), None);
    }

    #[test]
    fn webp_needs_riff_container() {
        assert_eq!(detect_image(&padded(b"ABCD\x10\0\0\0WEBPVP8 ")), None);
        assert_eq!(
            detect_image(&padded(b"RIFF\x10\0\0\0WEBPVP8 ")),
            Some(ImageKind::Webp)
        );
    }

    #[test]
    fn rejects_text_and_short_input() {
        assert!(!is_image(b"hello, world\n"));
        assert!(!is_image(&[]));
        assert!(!is_image(&[0xFF, 0xD8]));
    }

    #[test]
    fn read_head_caps_prefix_length() {
        let temp = tempdir().expect("tempdir");
        let long = temp.path().join("long.bin");
        let short = temp.path().join("short.bin");
        fs::write(&long, vec![0xAB; 1024]).expect("write long");
        fs::write(&short, b"abc").expect("write short");

        assert_eq!(read_head(&long).expect("read long").len(), SNIFF_LEN);
        assert_eq!(read_head(&short).expect("read short"), b"abc".to_vec());
    }
}
