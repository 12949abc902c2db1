//! Value coercion between Rust values and tag text.
//!
//! Writing goes through [`TagValue`], a closed set of the value shapes a tag
//! can be assigned from. Reading back (`to_number`, `to_date`, ...) is
//! best-effort: text that does not parse yields a default, never an error.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use super::{Tag, TagJson};

/// Text tokens read as `true` by [`TagRead::to_boolean`](super::TagRead::to_boolean).
pub const TRUTHY_TOKENS: [&str; 3] = ["true", "yes", "1"];

/// A value that can be written into a tag.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(DateTime<FixedOffset>),
    /// Only the text of the tag is copied
    Tag(Tag),
    /// Wrapped as a nested tag that replaces the whole content list
    Structure(TagJson),
}

impl TagValue {
    /// Returns the text this value renders to, or `None` for structures.
    pub fn render(&self) -> Option<String> {
        match self {
            TagValue::Bool(value) => Some(value.to_string()),
            TagValue::Int(value) => Some(value.to_string()),
            TagValue::Float(value) => Some(format_number(*value)),
            TagValue::Text(text) => Some(text.clone()),
            TagValue::Date(date) => Some(to_iso_string(date)),
            TagValue::Tag(tag) => Some(super::TagRead::text(tag).to_string()),
            TagValue::Structure(_) => None,
        }
    }
}

impl From<bool> for TagValue {
    fn from(value: bool) -> Self {
        TagValue::Bool(value)
    }
}

impl From<i32> for TagValue {
    fn from(value: i32) -> Self {
        TagValue::Int(value.into())
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        TagValue::Int(value)
    }
}

impl From<u32> for TagValue {
    fn from(value: u32) -> Self {
        TagValue::Int(value.into())
    }
}

impl From<f32> for TagValue {
    fn from(value: f32) -> Self {
        TagValue::Float(value.into())
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        TagValue::Float(value)
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        TagValue::Text(value.to_string())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        TagValue::Text(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for TagValue {
    fn from(value: DateTime<Tz>) -> Self {
        TagValue::Date(value.fixed_offset())
    }
}

impl From<Tag> for TagValue {
    fn from(value: Tag) -> Self {
        TagValue::Tag(value)
    }
}

impl From<&Tag> for TagValue {
    fn from(value: &Tag) -> Self {
        TagValue::Tag(value.clone())
    }
}

impl From<TagJson> for TagValue {
    fn from(value: TagJson) -> Self {
        TagValue::Structure(value)
    }
}

/// Renders a number in its canonical shortest form.
///
/// Integral values print without a fractional part, negative zero prints as
/// `0`, and very large or very small magnitudes switch to exponent notation
/// (`1e+21`, `1.5e-7`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }
    format!("{value}")
}

/// Formats a date as `YYYY-MM-DDTHH:mm:ss.sss±HH:mm` in its own offset.
pub fn to_iso_string<Tz: TimeZone>(date: &DateTime<Tz>) -> String {
    date.fixed_offset()
        .format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        .to_string()
}

/// Parses the longest leading floating point literal of `text`.
///
/// Leading whitespace is skipped. Accepts an optional sign, digits with an
/// optional fraction and exponent, or `Infinity`.
pub(crate) fn parse_number_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if text[end..].starts_with("Infinity") {
        return text[..end + "Infinity".len()].parse().ok();
    }

    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count()
    };
    let integral = digits_from(end);
    end += integral;
    let mut fractional = 0;
    if bytes.get(end) == Some(&b'.') {
        fractional = digits_from(end + 1);
        if integral > 0 || fractional > 0 {
            end += 1 + fractional;
        }
    }
    if integral == 0 && fractional == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent = digits_from(exponent_end);
        if exponent > 0 {
            end = exponent_end + exponent;
        }
    }
    text[..end].parse().ok()
}

/// Parses a date in one of the accepted textual forms.
///
/// RFC 3339 keeps its offset, a date-time without offset is read in the
/// local zone and a bare date is midnight UTC.
pub(crate) fn parse_date(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|date| date.fixed_offset());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive).fixed_offset())
}
