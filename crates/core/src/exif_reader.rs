use crate::tags::{RawTag, TagBlock, TagKey, TagReadError, TagReader};
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const TAG_MAP: &[(TagKey, Tag)] = &[
    (TagKey::Model, Tag::Model),
    (TagKey::LensModel, Tag::LensModel),
    (TagKey::FocalLength, Tag::FocalLength),
    (TagKey::ExposureTime, Tag::ExposureTime),
    (TagKey::FNumber, Tag::FNumber),
    (TagKey::Iso, Tag::PhotographicSensitivity),
    (TagKey::DateTimeOriginal, Tag::DateTimeOriginal),
    (TagKey::DateTimeDigitized, Tag::DateTimeDigitized),
    (TagKey::DateTime, Tag::DateTime),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct ExifTagReader;

impl TagReader for ExifTagReader {
    fn read_tags(&self, path: &Path) -> Result<TagBlock, TagReadError> {
        let file = File::open(path).map_err(|source| TagReadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut buf = BufReader::new(file);
        let exif = Reader::new()
            .read_from_container(&mut buf)
            .map_err(|err| TagReadError::Decode {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;

        Ok(TAG_MAP
            .iter()
            .filter_map(|(key, tag)| {
                let field = exif.get_field(*tag, In::PRIMARY)?;
                to_raw_tag(&field.value).map(|raw| (*key, raw))
            })
            .collect())
    }
}

fn to_raw_tag(value: &Value) -> Option<RawTag> {
    match value {
        Value::Ascii(parts) => {
            let text = parts
                .iter()
                .map(|part| {
                    String::from_utf8_lossy(part)
                        .trim_end_matches('\0')
                        .trim()
                        .to_string()
                })
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            Some(RawTag::Text(text))
        }
        Value::Rational(values) => values.first().map(|r| RawTag::rational(r.num, r.denom)),
        Value::Short(values) if !values.is_empty() => Some(RawTag::Unsigned(
            values.iter().map(|v| u32::from(*v)).collect(),
        )),
        Value::Long(values) if !values.is_empty() => Some(RawTag::Unsigned(values.clone())),
        _ => None,
    }
}
