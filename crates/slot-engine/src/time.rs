//! Parsing and wall-clock helpers shared by the scanners.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Result, SlotError};

const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse an ISO 8601 datetime string into `DateTime<Utc>`.
///
/// Accepts RFC 3339 (e.g. "2026-02-17T14:00:00-08:00") and naive
/// "2026-02-17T14:00:00", which is interpreted as UTC.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, NAIVE_FORMAT)
        .map(|ndt| ndt.and_utc())
        .map_err(|_| SlotError::InvalidDateTime(s.to_string()))
}

/// Parse a reference date from form input.
///
/// A bare "YYYY-MM-DD" means local midnight in `tz`; anything else goes
/// through [`parse_datetime`].
pub fn parse_reference(s: &str, tz: Tz) -> Result<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
        return local_instant(tz, date, 0, 0)
            .ok_or_else(|| SlotError::InvalidDateTime(s.to_string()));
    }
    parse_datetime(s)
}

/// Parse an IANA timezone identifier.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| SlotError::InvalidTimezone(name.to_string()))
}

/// The instant of `hour:minute` on `date` in `tz`.
///
/// Returns `None` when the wall-clock time does not exist (DST gap). Ambiguous
/// times resolve to the earliest instant. `hour == 24` means the following
/// midnight.
pub fn local_instant(tz: Tz, date: NaiveDate, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    let (date, hour) = if hour == 24 {
        (date.succ_opt()?, 0)
    } else {
        (date, hour)
    };
    let naive = date.and_time(NaiveTime::from_hms_opt(hour, minute, 0)?);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

/// "9:00 AM" style clock rendering in `tz`.
pub fn format_clock(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%-I:%M %p").to_string()
}

/// "Tuesday, June 3, 2025" style day rendering in `tz`.
pub fn format_day(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%A, %B %-d, %Y").to_string()
}
