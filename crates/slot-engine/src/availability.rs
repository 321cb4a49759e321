//! Open meeting slots within a day's working hours.
//!
//! Walks the working-hours band of one local day at a fixed step, sizes each
//! slot to the requested duration and keeps the ones no busy entry touches.
//! Besides the half-open overlap test, a slot whose start (or end) lands within
//! [`NEAR_COINCIDENCE_TOLERANCE_MS`] of an entry's start (or end) is rejected,
//! which also catches zero-length entries the overlap test lets through.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::config::{WorkingHours, NEAR_COINCIDENCE_TOLERANCE_MS};
use crate::interval::{BusyInterval, TimeInterval};
use crate::time::{format_clock, local_instant};

/// Which day to scan and how to cut it into slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub day: NaiveDate,
    pub duration_minutes: u32,
    pub working_hours: WorkingHours,
    pub step_minutes: u32,
    pub tolerance_ms: i64,
}

impl AvailabilityQuery {
    /// A query over the default 9:00-17:00 band at 30-minute steps.
    pub fn new(day: NaiveDate, duration_minutes: u32) -> Self {
        Self {
            day,
            duration_minutes,
            working_hours: WorkingHours::default(),
            step_minutes: 30,
            tolerance_ms: NEAR_COINCIDENCE_TOLERANCE_MS,
        }
    }

    pub fn with_working_hours(mut self, working_hours: WorkingHours) -> Self {
        self.working_hours = working_hours;
        self
    }

    pub fn with_step_minutes(mut self, step_minutes: u32) -> Self {
        self.step_minutes = step_minutes;
        self
    }

    pub fn with_tolerance_ms(mut self, tolerance_ms: i64) -> Self {
        self.tolerance_ms = tolerance_ms;
        self
    }

    fn is_valid(&self) -> bool {
        self.duration_minutes > 0
            && self.step_minutes > 0
            && self.tolerance_ms >= 0
            && self.working_hours.is_valid()
    }

    /// The whole local day `[00:00, next 00:00)` in `tz`, used as the calendar
    /// fetch window.
    pub fn day_window(&self, tz: Tz) -> Option<TimeInterval> {
        let start = local_instant(tz, self.day, 0, 0)?;
        let end = local_instant(tz, self.day, 24, 0)?;
        TimeInterval::new(start, end).ok()
    }
}

/// An open slot with its display rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// e.g. "10:00 AM - 10:30 AM" in the query's timezone.
    pub formatted: String,
}

/// Find the open slots of `query.day` in `tz`, in chronological order.
///
/// A slot ending exactly at the end of working hours is kept; any overshoot
/// drops it. Malformed busy entries (a missing instant) are ignored. Invalid
/// queries (zero duration or step, inverted hours) yield no slots.
pub fn find_available_slots(
    busy: &[BusyInterval],
    query: &AvailabilityQuery,
    tz: Tz,
) -> Vec<AvailableSlot> {
    if !query.is_valid() {
        tracing::warn!(?query, "ignoring invalid availability query");
        return Vec::new();
    }

    let hours = query.working_hours;
    let (Some(band_start), Some(band_end)) = (
        local_instant(tz, query.day, hours.start_hour, 0),
        local_instant(tz, query.day, hours.end_hour, 0),
    ) else {
        return Vec::new();
    };

    let entries: Vec<(DateTime<Utc>, DateTime<Utc>)> =
        busy.iter().filter_map(BusyInterval::bounds).collect();
    let step = Duration::minutes(i64::from(query.step_minutes));
    let duration = Duration::minutes(i64::from(query.duration_minutes));
    let tolerance = Duration::milliseconds(query.tolerance_ms);

    let mut slots = Vec::new();
    let mut start = band_start;
    while start < band_end {
        let Some(end) = start.checked_add_signed(duration) else {
            break;
        };
        if end <= band_end && !collides(start, end, &entries, tolerance) {
            slots.push(AvailableSlot {
                start,
                end,
                formatted: format!("{} - {}", format_clock(start, tz), format_clock(end, tz)),
            });
        }
        let Some(next) = start.checked_add_signed(step) else {
            break;
        };
        start = next;
    }

    tracing::debug!(
        day = %query.day,
        busy = entries.len(),
        open = slots.len(),
        "scanned working hours for open slots"
    );
    slots
}

fn collides(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    entries: &[(DateTime<Utc>, DateTime<Utc>)],
    tolerance: Duration,
) -> bool {
    entries.iter().any(|&(busy_start, busy_end)| {
        (start < busy_end && end > busy_start)
            || gap(start, busy_start) < tolerance
            || gap(end, busy_end) < tolerance
    })
}

fn gap(a: DateTime<Utc>, b: DateTime<Utc>) -> Duration {
    if a >= b {
        a - b
    } else {
        b - a
    }
}
