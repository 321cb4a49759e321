//! Tests for `TimeInterval` and `BusyInterval`.

use chrono::{DateTime, TimeZone, Utc};
use slot_engine::{BusyInterval, SlotError, TimeInterval};

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, hour, minute, 0).unwrap()
}

fn interval(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeInterval {
    TimeInterval::new(start, end).unwrap()
}

#[test]
fn new_rejects_empty_and_reversed() {
    assert!(matches!(
        TimeInterval::new(at(9, 0), at(9, 0)),
        Err(SlotError::InvalidInterval(_))
    ));
    assert!(TimeInterval::new(at(10, 0), at(9, 0)).is_err());
    assert!(TimeInterval::new(at(9, 0), at(9, 1)).is_ok());
}

#[test]
fn overlap_minutes_of_partial_overlap() {
    let a = interval(at(9, 0), at(10, 0));
    let b = interval(at(9, 30), at(11, 0));
    assert_eq!(a.overlap_minutes(&b), 30);
    assert_eq!(b.overlap_minutes(&a), 30);
}

#[test]
fn touching_intervals_do_not_overlap() {
    let a = interval(at(9, 0), at(10, 0));
    let b = interval(at(10, 0), at(11, 0));
    assert!(!a.overlaps(&b));
    assert_eq!(a.overlap_minutes(&b), 0);
}

#[test]
fn contains_is_inclusive_at_both_ends() {
    let day = interval(at(9, 0), at(17, 0));

    assert!(day.contains(&day));
    assert!(day.contains(&interval(at(9, 0), at(10, 0))));
    assert!(day.contains(&interval(at(16, 0), at(17, 0))));
    assert!(day.contains(&interval(at(12, 0), at(13, 0))));

    assert!(!day.contains(&interval(at(8, 59), at(10, 0))));
    assert!(!day.contains(&interval(at(16, 0), at(17, 1))));
    assert!(!interval(at(12, 0), at(13, 0)).contains(&day));
}

#[test]
fn busy_interval_missing_end_is_malformed() {
    let busy = BusyInterval {
        start: Some(at(9, 0)),
        ..Default::default()
    };
    assert!(busy.as_interval().is_none());
    assert!(busy.bounds().is_none());
}

#[test]
fn reversed_busy_interval_has_bounds_but_no_interval() {
    let busy = BusyInterval::new(at(10, 0), at(9, 0));
    assert_eq!(busy.bounds(), Some((at(10, 0), at(9, 0))));
    assert!(busy.as_interval().is_none());
}

#[test]
fn busy_interval_builders_set_metadata() {
    let busy = BusyInterval::new(at(9, 0), at(10, 0))
        .with_id("evt-1")
        .with_summary("Standup");
    assert_eq!(busy.id.as_deref(), Some("evt-1"));
    assert_eq!(busy.summary.as_deref(), Some("Standup"));
    assert_eq!(busy.as_interval(), Some(interval(at(9, 0), at(10, 0))));
}

#[test]
fn deserialize_rejects_reversed_interval() {
    let json = r#"{"start":"2026-03-16T10:00:00Z","end":"2026-03-16T09:00:00Z"}"#;
    assert!(serde_json::from_str::<TimeInterval>(json).is_err());

    let json = r#"{"start":"2026-03-16T09:00:00Z","end":"2026-03-16T10:00:00Z"}"#;
    let parsed: TimeInterval = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.duration_minutes(), 60);
}
