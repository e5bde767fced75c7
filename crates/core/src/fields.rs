use crate::tags::{RawTag, TagBlock, TagKey};
use chrono::{DateTime, Local, LocalResult, NaiveDateTime, TimeZone};

const DATE_TAGS: [TagKey; 3] = [
    TagKey::DateTimeOriginal,
    TagKey::DateTimeDigitized,
    TagKey::DateTime,
];

pub fn strip_quotes(value: &str) -> String {
    value.replace('"', "")
}

pub fn tag_text(tag: Option<&RawTag>) -> String {
    tag.map(|t| strip_quotes(&t.to_string()))
        .unwrap_or_default()
}

pub fn iso(tag: Option<&RawTag>) -> String {
    tag.map(ToString::to_string).unwrap_or_default()
}

pub fn focal_length(tag: Option<&RawTag>) -> String {
    let Some((num, denom)) = tag.and_then(RawTag::as_rational) else {
        return String::new();
    };
    if denom == 0 {
        return String::new();
    }
    if num % denom == 0 {
        (num / denom).to_string()
    } else {
        format!("{:.1}", f64::from(num) / f64::from(denom))
    }
}

pub fn aperture(tag: Option<&RawTag>) -> String {
    let Some(tag) = tag else {
        return String::new();
    };
    let raw = strip_quotes(&tag.to_string());
    let Some((a, b)) = raw.split_once('/') else {
        return String::new();
    };
    let (Ok(a), Ok(b)) = (a.trim().parse::<i64>(), b.trim().parse::<i64>()) else {
        return String::new();
    };
    if b == 0 {
        return String::new();
    }
    format!("{:.1}", a as f64 / b as f64)
}

pub fn capture_date(tags: &TagBlock) -> Option<DateTime<Local>> {
    DATE_TAGS.iter().find_map(|key| match tags.get(*key) {
        Some(RawTag::Text(raw)) => parse_date(raw),
        _ => None,
    })
}

pub fn format_capture_date(date: Option<&DateTime<Local>>) -> String {
    date.map(|d| d.format("%Y-%m-%d %H:%M:%S %z").to_string())
        .unwrap_or_default()
}

fn parse_date(input: &str) -> Option<DateTime<Local>> {
    let normalized = input.trim();

    let candidates = [
        "%Y:%m:%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%:z",
        "%Y-%m-%dT%H:%M:%S%.f%:z",
    ];

    for fmt in candidates {
        if let Ok(dt) = DateTime::parse_from_str(normalized, fmt) {
            return Some(dt.with_timezone(&Local));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(normalized, fmt) {
            if let Some(local) = resolve_local(Local.from_local_datetime(&naive)) {
                return Some(local);
            }
        }
    }

    None
}

// Wall-clock times repeated by a DST switch keep the earlier instant.
fn resolve_local(candidate: LocalResult<DateTime<Local>>) -> Option<DateTime<Local>> {
    candidate.earliest()
}
