mod config;
mod exif_reader;
mod fields;
mod metadata;
mod render;
mod scanner;
mod selector;
mod sniff;
mod tags;

pub use config::{app_paths, load_config, load_config_from, save_config, AppConfig, AppPaths};
pub use exif_reader::ExifTagReader;
pub use fields::{
    aperture, capture_date, focal_length, format_capture_date, iso, strip_quotes, tag_text,
};
pub use metadata::PhotoRecord;
pub use render::{
    render, render_document, RenderOptions, WriteMode, DEFAULT_IMAGE_WIDTH,
    DEFAULT_TEXT_TIMESTAMP,
};
pub use scanner::{
    scan_directory, DecodeErrorPolicy, DecodeFailure, ScanOptions, ScanReport, ScanStats,
};
pub use selector::{choose_format, FixedSelector, FormatSelector, ListFormat};
pub use sniff::{detect_image, is_image, read_head, ImageKind, SNIFF_LEN};
pub use tags::{RawTag, TagBlock, TagKey, TagReadError, TagReader};
