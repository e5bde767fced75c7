use crate::metadata::PhotoRecord;
use crate::sniff::{detect_image, read_head};
use crate::tags::TagReader;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DecodeErrorPolicy {
    #[default]
    Skip,
    Stop,
}

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub dir: PathBuf,
    pub on_decode_error: DecodeErrorPolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            on_decode_error: DecodeErrorPolicy::Skip,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub scanned_entries: usize,
    pub skipped_dirs: usize,
    pub skipped_non_image: usize,
    pub unreadable: usize,
    pub decode_failures: usize,
    pub photos: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecodeFailure {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScanReport {
    pub photos: Vec<PhotoRecord>,
    pub failures: Vec<DecodeFailure>,
    pub stats: ScanStats,
    /// Set when [`DecodeErrorPolicy::Stop`] ended the scan before the last entry.
    pub truncated: bool,
}

pub fn scan_directory(options: &ScanOptions, reader: &dyn TagReader) -> Result<ScanReport> {
    let root = &options.dir;
    let meta = fs::metadata(root)
        .with_context(|| format!("フォルダを読めませんでした: {}", root.display()))?;
    if !meta.is_dir() {
        anyhow::bail!("フォルダではありません: {}", root.display());
    }

    let mut report = ScanReport::default();

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("フォルダ走査に失敗しました: {}", root.display()))?;
        let path = entry.path();
        report.stats.scanned_entries += 1;

        if path.is_dir() {
            report.stats.skipped_dirs += 1;
            continue;
        }

        let head = match read_head(path) {
            Ok(head) => head,
            Err(err) => {
                log::debug!("skip unreadable {}: {}", path.display(), err);
                report.stats.unreadable += 1;
                continue;
            }
        };

        let Some(kind) = detect_image(&head) else {
            report.stats.skipped_non_image += 1;
            continue;
        };

        match reader.read_tags(path) {
            Ok(tags) => {
                log::debug!("{} ({}): {} tags", path.display(), kind, tags.len());
                report
                    .photos
                    .push(PhotoRecord::from_tags(display_name(path), kind, &tags));
            }
            Err(err) => {
                log::debug!("decode failed: {}", err);
                report.stats.decode_failures += 1;
                report.failures.push(DecodeFailure {
                    path: path.to_path_buf(),
                    message: err.to_string(),
                });
                if options.on_decode_error == DecodeErrorPolicy::Stop {
                    report.truncated = true;
                    break;
                }
            }
        }
    }

    report.stats.photos = report.photos.len();
    Ok(report)
}

// `./IMG_0001.JPG` is shown as `IMG_0001.JPG`.
fn display_name(path: &Path) -> String {
    path.strip_prefix(".")
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::{RawTag, TagBlock, TagKey, TagReadError};
    use std::collections::HashSet;
    use tempfile::tempdir;

    const JPEG_HEAD: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE1, 0x00, 0x10, b'E', b'x', b'i', b'f'];

    struct StubReader {
        broken: HashSet<String>,
    }

    impl StubReader {
        fn new(broken: &[&str]) -> Self {
            Self {
                broken: broken.iter().map(|s| s.to_string()).collect(),
            }
        }
    }

    impl TagReader for StubReader {
        fn read_tags(&self, path: &Path) -> Result<TagBlock, TagReadError> {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if self.broken.contains(&name) {
                return Err(TagReadError::Decode {
                    path: path.to_path_buf(),
                    message: "broken".to_string(),
                });
            }
            Ok(TagBlock::new()
                .with(TagKey::Model, RawTag::text(name))
                .with(TagKey::FNumber, RawTag::rational(28, 10)))
        }
    }

    fn write_jpeg(dir: &Path, name: &str) {
        fs::write(dir.join(name), JPEG_HEAD).expect("write jpeg");
    }

    fn options(dir: &Path, policy: DecodeErrorPolicy) -> ScanOptions {
        ScanOptions {
            dir: dir.to_path_buf(),
            on_decode_error: policy,
        }
    }

    #[test]
    fn non_image_files_yield_empty_report() {
        let temp = tempdir().expect("tempdir");
        fs::write(temp.path().join("notes.txt"), b"hello").expect("write txt");
        fs::write(temp.path().join("data.bin"), [0u8, 1, 2, 3]).expect("write bin");

        let report = scan_directory(
            &options(temp.path(), DecodeErrorPolicy::Skip),
            &StubReader::new(&[]),
        )
        .expect("scan");

        assert!(report.photos.is_empty());
        assert_eq!(report.stats.scanned_entries, 2);
        assert_eq!(report.stats.skipped_non_image, 2);
    }

    #[test]
    fn images_are_listed_in_file_name_order() {
        let temp = tempdir().expect("tempdir");
        write_jpeg(temp.path(), "c.jpg");
        write_jpeg(temp.path(), "a.jpg");
        write_jpeg(temp.path(), "b.jpg");

        let report = scan_directory(
            &options(temp.path(), DecodeErrorPolicy::Skip),
            &StubReader::new(&[]),
        )
        .expect("scan");

        let bodies: Vec<&str> = report.photos.iter().map(|p| p.body_model.as_str()).collect();
        assert_eq!(bodies, vec!["a.jpg", "b.jpg", "c.jpg"]);
        assert!(report.photos[0].name.ends_with("a.jpg"));
        assert_eq!(report.photos[0].aperture, "2.8");
        assert_eq!(report.stats.photos, 3);
    }

    #[test]
    fn subdirectories_are_not_recursed() {
        let temp = tempdir().expect("tempdir");
        let nested = temp.path().join("nested");
        fs::create_dir_all(&nested).expect("create nested");
        write_jpeg(&nested, "inner.jpg");
        write_jpeg(temp.path(), "outer.jpg");

        let report = scan_directory(
            &options(temp.path(), DecodeErrorPolicy::Skip),
            &StubReader::new(&[]),
        )
        .expect("scan");

        assert_eq!(report.photos.len(), 1);
        assert_eq!(report.photos[0].body_model, "outer.jpg");
        assert_eq!(report.stats.skipped_dirs, 1);
    }

    #[test]
    fn stop_policy_returns_images_before_first_failure() {
        let temp = tempdir().expect("tempdir");
        write_jpeg(temp.path(), "1.jpg");
        write_jpeg(temp.path(), "2.jpg");
        write_jpeg(temp.path(), "3.jpg");
        write_jpeg(temp.path(), "4.jpg");

        let report = scan_directory(
            &options(temp.path(), DecodeErrorPolicy::Stop),
            &StubReader::new(&["3.jpg"]),
        )
        .expect("scan");

        assert_eq!(report.photos.len(), 2);
        assert!(report.truncated);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("3.jpg"));
        assert_eq!(report.stats.scanned_entries, 3);
    }

    #[test]
    fn skip_policy_keeps_going_after_failure() {
        let temp = tempdir().expect("tempdir");
        write_jpeg(temp.path(), "1.jpg");
        write_jpeg(temp.path(), "2.jpg");
        write_jpeg(temp.path(), "3.jpg");

        let report = scan_directory(
            &options(temp.path(), DecodeErrorPolicy::Skip),
            &StubReader::new(&["2.jpg"]),
        )
        .expect("scan");

        assert_eq!(report.photos.len(), 2);
        assert!(!report.truncated);
        assert_eq!(report.stats.decode_failures, 1);
        assert!(report.failures[0].path.ends_with("2.jpg"));
        assert!(report.failures[0].message.ends_with(": broken"));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp = tempdir().expect("tempdir");
        let err = scan_directory(
            &options(&temp.path().join("absent"), DecodeErrorPolicy::Skip),
            &StubReader::new(&[]),
        )
        .expect_err("missing dir must fail");
        assert!(err.to_string().contains("フォルダを読めませんでした"));
    }

    #[test]
    fn display_name_drops_current_dir_prefix() {
        assert_eq!(display_name(Path::new("./IMG_0001.JPG")), "IMG_0001.JPG");
        assert_eq!(display_name(Path::new("photos/a.jpg")), "photos/a.jpg");
    }
}
