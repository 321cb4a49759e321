//! Tests for datetime parsing and wall-clock helpers.

use chrono::NaiveDate;
use chrono_tz::Tz;
use slot_engine::time::{
    format_clock, format_day, local_instant, parse_datetime, parse_reference, parse_timezone,
};
use slot_engine::SlotError;

fn new_york() -> Tz {
    "America/New_York".parse().unwrap()
}

#[test]
fn parses_rfc3339_with_offset() {
    let dt = parse_datetime("2026-03-16T09:00:00-07:00").unwrap();
    assert_eq!(dt.to_rfc3339(), "2026-03-16T16:00:00+00:00");
}

#[test]
fn naive_datetime_is_utc() {
    let dt = parse_datetime("2026-03-16T09:00:00").unwrap();
    assert_eq!(dt.to_rfc3339(), "2026-03-16T09:00:00+00:00");
}

#[test]
fn garbage_is_invalid_datetime() {
    assert!(matches!(
        parse_datetime("next tuesday"),
        Err(SlotError::InvalidDateTime(_))
    ));
}

#[test]
fn bare_date_is_local_midnight() {
    let dt = parse_reference("2026-03-16", new_york()).unwrap();
    assert_eq!(dt.to_rfc3339(), "2026-03-16T04:00:00+00:00");
}

#[test]
fn unknown_timezone_is_rejected() {
    assert!(parse_timezone("Europe/Paris").is_ok());
    assert!(matches!(
        parse_timezone("Mars/Olympus"),
        Err(SlotError::InvalidTimezone(_))
    ));
}

#[test]
fn spring_forward_gap_has_no_instant() {
    let date = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
    assert!(local_instant(new_york(), date, 2, 30).is_none());
    assert!(local_instant(new_york(), date, 3, 0).is_some());
}

#[test]
fn hour_24_rolls_to_next_midnight() {
    let date = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
    let end = local_instant(Tz::UTC, date, 24, 0).unwrap();
    assert_eq!(end.to_rfc3339(), "2026-03-17T00:00:00+00:00");
}

#[test]
fn clock_and_day_formats() {
    let dt = parse_datetime("2025-06-03T13:05:00Z").unwrap();
    assert_eq!(format_clock(dt, Tz::UTC), "1:05 PM");
    assert_eq!(format_day(dt, Tz::UTC), "Tuesday, June 3, 2025");
}
