//! Value coercion integration tests

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use tagdown::{TagRead, TagValue, t};

use crate::helpers::*;

fn stopped() -> StoppedClock {
    StoppedClock(
        DateTime::parse_from_rfc3339("2030-05-06T07:08:09.010+02:00").unwrap(),
    )
}

// ===== NUMBERS =====

#[test]
fn test_to_number_reads_leading_number() {
    let cases = [
        ("42", 42.0),
        ("  -1.25rem", -1.25),
        ("3e2 items", 300.0),
        ("7.", 7.0),
        ("1e", 1.0),
        ("abc", 0.0),
        ("", 0.0),
        ("-0", 0.0),
        ("Infinity", f64::INFINITY),
    ];
    for (text, expected) in cases {
        assert_eq!(t("n").with_text(text).to_number(), expected, "text {text:?}");
    }
}

#[test]
fn test_to_number_uses_first_run_only() {
    let mut tag = t("n");
    tag.add_contents([tagdown::tag::Content::from(t("b")), "12".into()]);
    assert_eq!(tag.to_number(), 0.0);
}

#[test]
fn test_number_written_canonically() {
    let mut tag = t("n");
    assert_eq!(tag.from_number(10.0).text(), "10");
    assert_eq!(tag.from_number(0.1 + 0.2).text(), "0.30000000000000004");
    assert_eq!(tag.from_number(-2.5e-9).text(), "-2.5e-9");
    assert_eq!(tag.from_number(3u32).text(), "3");
    assert_eq!(tag.from_value(7i64).text(), "7");
}

// ===== BOOLEANS =====

#[test]
fn test_to_boolean_tokens() {
    for text in ["true", "yes", "1"] {
        assert!(t("b").with_text(text).to_boolean(), "{text}");
    }
    for text in ["TRUE", "on", "0", "", " true"] {
        assert!(!t("b").with_text(text).to_boolean(), "{text}");
    }
    assert!(!t("b").to_boolean());
}

#[test]
fn test_bool_written_as_word() {
    let mut tag = t("b");
    assert!(tag.from_bool(true).to_boolean());
    assert!(!tag.from_value(false).to_boolean());
    assert_eq!(tag.text(), "false");
}

// ===== DATES =====

#[test]
fn test_date_round_trip_keeps_offset() {
    let offset = FixedOffset::west_opt(5 * 3600).unwrap();
    let date = offset.with_ymd_and_hms(1999, 12, 31, 23, 59, 59).unwrap();
    let mut tag = t("d");
    tag.from_date(&date);
    assert_eq!(tag.text(), "1999-12-31T23:59:59.000-05:00");
    assert_eq!(tag.to_date_with(&stopped()), date);
}

#[test]
fn test_utc_dates_print_numeric_offset() {
    let date = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
    let mut tag = t("d");
    assert_eq!(tag.from_value(date).text(), "2024-02-29T12:00:00.000+00:00");
}

#[test]
fn test_bare_date_is_utc_midnight() {
    let tag = t("d").with_text("2021-07-04");
    let expected = Utc.with_ymd_and_hms(2021, 7, 4, 0, 0, 0).unwrap();
    assert_eq!(tag.to_date_with(&stopped()), expected);
}

#[test]
fn test_unparsable_date_falls_back_to_clock() {
    let clock = stopped();
    for text in ["", "yesterday", "2021-13-01"] {
        assert_eq!(t("d").with_text(text).to_date_with(&clock), clock.0, "{text:?}");
    }
}

// ===== TAG AND STRUCTURE VALUES =====

#[test]
fn test_tag_value_copies_text_only() {
    let source = t("src")
        .with_attributes([t("lang").with_text("en")])
        .with_text("copied");
    let mut target = t("dst");
    target.from_value(TagValue::from(&source));
    assert_eq!(target.text(), "copied");
    assert!(target.attributes.is_empty());
    assert_eq!(target.name, "dst");
}

#[test]
fn test_render() {
    assert_eq!(TagValue::from(1.5f32).render().as_deref(), Some("1.5"));
    assert_eq!(TagValue::from("x").render().as_deref(), Some("x"));
    assert_eq!(TagValue::from(t("a")).render().as_deref(), Some(""));
    assert!(TagValue::from(tagdown::TagJson::named("s")).render().is_none());
}
