//! Property-based tests for the scheduling engine using proptest.
//!
//! These check invariants that should hold for *any* reference date, busy
//! calendar or query, not just the fixed examples in the other test files.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use slot_engine::{
    find_available_slots, find_conflicts, AvailabilityQuery, BusyInterval, EngineConfig,
    SchedulingRequest, SuggestionGenerator, TimeInterval, WorkingHours,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap()
}

/// An instant within 2026-03-16, at minute granularity.
fn arb_instant() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..24 * 60).prop_map(|m| base() + Duration::minutes(m))
}

fn arb_busy() -> impl Strategy<Value = BusyInterval> {
    (arb_instant(), 1i64..240)
        .prop_map(|(start, len)| BusyInterval::new(start, start + Duration::minutes(len)))
}

/// Busy entries including zero-length ones.
fn arb_busy_or_point() -> impl Strategy<Value = BusyInterval> {
    (arb_instant(), 0i64..240)
        .prop_map(|(start, len)| BusyInterval::new(start, start + Duration::minutes(len)))
}

fn arb_interval() -> impl Strategy<Value = TimeInterval> {
    (arb_instant(), 1i64..240)
        .prop_map(|(start, len)| TimeInterval::new(start, start + Duration::minutes(len)).unwrap())
}

fn arb_timezone() -> impl Strategy<Value = Tz> {
    prop_oneof![
        Just(Tz::UTC),
        Just(chrono_tz::America::New_York),
        Just(chrono_tz::America::Los_Angeles),
        Just(chrono_tz::Europe::London),
        Just(chrono_tz::Asia::Tokyo),
    ]
}

/// A reference date between one year ago and one year ahead of `base()`.
fn arb_reference() -> impl Strategy<Value = DateTime<Utc>> {
    (-365i64..365, 0i64..24).prop_map(|(d, h)| base() + Duration::days(d) + Duration::hours(h))
}

// ---------------------------------------------------------------------------
// Suggestion generator
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn suggestions_are_bounded_unique_and_singly_recommended(
        reference in arb_reference(),
        seed in any::<u64>(),
        tz in arb_timezone(),
        duration in prop_oneof![Just(30u32), Just(60u32), Just(90u32)],
    ) {
        let gen = SuggestionGenerator::new(EngineConfig::default(), tz);
        let request = SchedulingRequest::new(reference, duration);
        let slots = gen.generate(&request, base(), &mut StdRng::seed_from_u64(seed));

        prop_assert!(slots.len() <= 6);
        prop_assert!(!slots.is_empty());
        prop_assert_eq!(slots.iter().filter(|s| s.recommended).count(), 1);

        let mut intervals: Vec<_> = slots.iter().map(|s| s.interval).collect();
        intervals.sort_by_key(|i| i.start());
        intervals.dedup();
        prop_assert_eq!(intervals.len(), slots.len());

        for slot in &slots {
            let start = slot.interval.start().with_timezone(&tz);
            let end = slot.interval.end().with_timezone(&tz);
            prop_assert_eq!(start.date_naive(), end.date_naive());
            let start_min = start.hour() * 60 + start.minute();
            let end_min = end.hour() * 60 + end.minute();
            let morning = start_min >= 9 * 60 && end_min <= 12 * 60;
            let afternoon = start_min >= 13 * 60 && end_min <= 17 * 60;
            prop_assert!(morning || afternoon, "slot {} outside bands", slot.label);
        }
    }

    #[test]
    fn past_references_never_anchor_before_tomorrow(
        days_ago in 1i64..400,
        seed in any::<u64>(),
    ) {
        let now = base() + Duration::hours(12);
        let gen = SuggestionGenerator::new(EngineConfig::default(), Tz::UTC);
        let request = SchedulingRequest::new(now - Duration::days(days_ago), 60);
        let slots = gen.generate(&request, now, &mut StdRng::seed_from_u64(seed));

        let tomorrow = NaiveDate::from_ymd_opt(2026, 3, 17).unwrap();
        for slot in &slots {
            prop_assert!(slot.interval.start().date_naive() >= tomorrow);
        }
    }
}

// ---------------------------------------------------------------------------
// Conflict checker
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn conflicts_are_exactly_the_overlapping_entries(
        entries in prop::collection::vec(arb_busy(), 0..12),
        proposed in arb_interval(),
    ) {
        let expected: Vec<BusyInterval> = entries
            .iter()
            .filter(|e| e.as_interval().is_some_and(|i| i.overlaps(&proposed)))
            .cloned()
            .collect();

        match find_conflicts(&entries, &proposed) {
            None => prop_assert!(expected.is_empty()),
            Some(found) => {
                prop_assert!(!found.is_empty());
                prop_assert_eq!(found, expected);
            }
        }
    }

    #[test]
    fn contained_intervals_always_conflict(outer in arb_interval(), cut in 0i64..60) {
        let len = outer.duration_minutes();
        prop_assume!(len > 2 * cut);
        let inner = TimeInterval::new(
            outer.start() + Duration::minutes(cut),
            outer.end() - Duration::minutes(cut),
        ).unwrap();

        prop_assert!(find_conflicts(&[BusyInterval::from(inner)], &outer).is_some());
        prop_assert!(find_conflicts(&[BusyInterval::from(outer)], &inner).is_some());
    }
}

// ---------------------------------------------------------------------------
// Availability scanner
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn open_slots_respect_hours_and_busy_entries(
        entries in prop::collection::vec(arb_busy_or_point(), 0..8),
        duration in 15u32..=180,
        step in prop_oneof![Just(15u32), Just(30u32), Just(60u32)],
        start_hour in 6u32..12,
        end_hour in 13u32..=20,
    ) {
        let day = base().date_naive();
        let query = AvailabilityQuery::new(day, duration)
            .with_working_hours(WorkingHours::new(start_hour, end_hour))
            .with_step_minutes(step);
        let slots = find_available_slots(&entries, &query, Tz::UTC);

        let open = base() + Duration::hours(i64::from(start_hour));
        let close = base() + Duration::hours(i64::from(end_hour));
        for slot in &slots {
            prop_assert!(slot.start >= open);
            prop_assert!(slot.end <= close);
            prop_assert_eq!(slot.end - slot.start, Duration::minutes(i64::from(duration)));
            let interval = TimeInterval::new(slot.start, slot.end).unwrap();
            prop_assert!(find_conflicts(&entries, &interval).is_none());
        }
        prop_assert!(slots.windows(2).all(|w| w[0].start < w[1].start));
        prop_assert_eq!(&slots, &find_available_slots(&entries, &query, Tz::UTC));
    }
}
