use crate::fields::format_capture_date;
use crate::metadata::PhotoRecord;
use crate::selector::ListFormat;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_IMAGE_WIDTH: u32 = 200;
pub const DEFAULT_TEXT_TIMESTAMP: &str = "2019.4.11 20:20";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    #[default]
    Truncate,
    Append,
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub out_dir: PathBuf,
    pub write_mode: WriteMode,
    pub image_width: u32,
    pub text_timestamp: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            write_mode: WriteMode::Truncate,
            image_width: DEFAULT_IMAGE_WIDTH,
            text_timestamp: DEFAULT_TEXT_TIMESTAMP.to_string(),
        }
    }
}

/// Writes the listing and returns the file path. [`ListFormat::Stop`] touches
/// nothing and returns `None`.
pub fn render(
    records: &[PhotoRecord],
    format: ListFormat,
    options: &RenderOptions,
) -> Result<Option<PathBuf>> {
    let Some(file_name) = format.file_name() else {
        return Ok(None);
    };
    let Some(document) = render_document(records, format, options, Local::now()) else {
        return Ok(None);
    };

    let path = options.out_dir.join(file_name);
    let mut file = open_output(&path, options.write_mode)?;
    file.write_all(document.as_bytes())
        .with_context(|| format!("一覧ファイルを書き込めませんでした: {}", path.display()))?;
    Ok(Some(path))
}

pub fn render_document(
    records: &[PhotoRecord],
    format: ListFormat,
    options: &RenderOptions,
    now: DateTime<Local>,
) -> Option<String> {
    let updated = match format {
        ListFormat::Markdown => now.format("%Y-%m-%d %H:%M:%S %z").to_string(),
        ListFormat::Text => options.text_timestamp.clone(),
        ListFormat::Stop => return None,
    };

    let mut out = String::new();
    push_line(&mut out, "# exif list");
    push_line(&mut out, &format!("last updated: {}", updated));
    push_line(&mut out, "---");

    for photo in records {
        push_line(&mut out, &format!("## {}", photo.name));
        if format == ListFormat::Markdown {
            push_line(
                &mut out,
                &format!(
                    "<img src='{}' alt='drawing' width='{}'/>",
                    photo.name, options.image_width
                ),
            );
        }
        push_line(&mut out, &format_capture_date(photo.capture_date.as_ref()));
        push_line(&mut out, "");
        push_line(&mut out, &photo.body_model);
        push_line(&mut out, &photo.lens_model);
        push_line(&mut out, &format!("{}mm", photo.focal_length));
        push_line(&mut out, &format!("{}sec", photo.shutter_speed));
        push_line(&mut out, &format!("F{}", photo.aperture));
        push_line(&mut out, &format!("ISO {}", photo.iso));
        push_line(&mut out, "");
    }

    Some(out)
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

fn open_output(path: &Path, mode: WriteMode) -> Result<File> {
    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        WriteMode::Truncate => options.write(true).truncate(true),
        WriteMode::Append => options.append(true),
    };
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o666);
    }
    options
        .open(path)
        .with_context(|| format!("一覧ファイルを開けませんでした: {}", path.display()))
}
