use crate::fields::{aperture, capture_date, focal_length, iso, tag_text};
use crate::sniff::ImageKind;
use crate::tags::{TagBlock, TagKey};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub name: String,
    pub kind: ImageKind,
    pub capture_date: Option<DateTime<Local>>,
    pub body_model: String,
    pub lens_model: String,
    pub focal_length: String,
    pub shutter_speed: String,
    pub aperture: String,
    pub iso: String,
}

impl PhotoRecord {
    pub fn from_tags(name: impl Into<String>, kind: ImageKind, tags: &TagBlock) -> Self {
        Self {
            name: name.into(),
            kind,
            capture_date: capture_date(tags),
            body_model: tag_text(tags.get(TagKey::Model)),
            lens_model: tag_text(tags.get(TagKey::LensModel)),
            focal_length: focal_length(tags.get(TagKey::FocalLength)),
            shutter_speed: tag_text(tags.get(TagKey::ExposureTime)),
            aperture: aperture(tags.get(TagKey::FNumber)),
            iso: iso(tags.get(TagKey::Iso)),
        }
    }
}
