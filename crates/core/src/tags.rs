use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKey {
    Model,
    LensModel,
    FocalLength,
    ExposureTime,
    FNumber,
    Iso,
    DateTimeOriginal,
    DateTimeDigitized,
    DateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTag {
    Text(String),
    Rational { num: u32, denom: u32 },
    Unsigned(Vec<u32>),
}

impl RawTag {
    pub fn text(value: impl Into<String>) -> Self {
        RawTag::Text(value.into())
    }

    pub fn rational(num: u32, denom: u32) -> Self {
        RawTag::Rational { num, denom }
    }

    pub fn as_rational(&self) -> Option<(u32, u32)> {
        match self {
            RawTag::Rational { num, denom } => Some((*num, *denom)),
            _ => None,
        }
    }
}

/// Raw string form: text is quoted, rationals are `num/denom`, integers are
/// comma separated.
impl fmt::Display for RawTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawTag::Text(value) => write!(f, "\"{}\"", value),
            RawTag::Rational { num, denom } => write!(f, "{}/{}", num, denom),
            RawTag::Unsigned(values) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagBlock {
    tags: HashMap<TagKey, RawTag>,
}

impl TagBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: TagKey, value: RawTag) -> Self {
        self.tags.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: TagKey, value: RawTag) {
        self.tags.insert(key, value);
    }

    pub fn get(&self, key: TagKey) -> Option<&RawTag> {
        self.tags.get(&key)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl FromIterator<(TagKey, RawTag)> for TagBlock {
    fn from_iter<I: IntoIterator<Item = (TagKey, RawTag)>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TagReadError {
    #[error("メタデータ読み込み対象を開けませんでした: {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("EXIFを解析できませんでした: {path}: {message}")]
    Decode { path: PathBuf, message: String },
}

/// Decodes the metadata block of one file.
///
/// An error means the block as a whole is unusable. Individual missing tags are
/// simply absent from the returned [`TagBlock`].
pub trait TagReader {
    fn read_tags(&self, path: &Path) -> Result<TagBlock, TagReadError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_renders_quoted() {
        assert_eq!(RawTag::text("X-T5").to_string(), "\"X-T5\"");
    }

    #[test]
    fn rational_renders_as_fraction() {
        assert_eq!(RawTag::rational(1, 250).to_string(), "1/250");
        assert_eq!(RawTag::rational(28, 10).as_rational(), Some((28, 10)));
        assert_eq!(RawTag::text("28/10").as_rational(), None);
    }

    #[test]
    fn unsigned_values_are_comma_separated() {
        assert_eq!(RawTag::Unsigned(vec![100]).to_string(), "100");
        assert_eq!(RawTag::Unsigned(vec![100, 200]).to_string(), "100, 200");
    }

    #[test]
    fn block_collects_and_overwrites() {
        let mut block: TagBlock = vec![(TagKey::Model, RawTag::text("A"))]
            .into_iter()
            .collect();
        block.insert(TagKey::Model, RawTag::text("B"));
        assert_eq!(block.len(), 1);
        assert_eq!(block.get(TagKey::Model), Some(&RawTag::text("B")));
        assert_eq!(block.get(TagKey::LensModel), None);
    }
}
