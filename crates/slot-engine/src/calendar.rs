//! Calendar input: event-listing parsing and the fetch seam.
//!
//! The engine never talks to a calendar provider itself. Callers either hand
//! it a parsed listing or implement [`CalendarSource`]; fetch failures travel
//! back to the caller untouched.

use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::Value;

use crate::availability::{find_available_slots, AvailabilityQuery, AvailableSlot};
use crate::conflict::ConflictStatus;
use crate::error::{Result, SlotError};
use crate::interval::{BusyInterval, TimeInterval};
use crate::time::parse_datetime;

/// Anything that can list busy entries for a time window.
pub trait CalendarSource {
    /// # Errors
    /// Implementations report provider failures as `SlotError::CalendarFetch`.
    fn busy_intervals(&self, window: &TimeInterval) -> Result<Vec<BusyInterval>>;
}

impl<F> CalendarSource for F
where
    F: Fn(&TimeInterval) -> Result<Vec<BusyInterval>>,
{
    fn busy_intervals(&self, window: &TimeInterval) -> Result<Vec<BusyInterval>> {
        self(window)
    }
}

/// An in-memory calendar, e.g. a listing parsed from a file.
#[derive(Debug, Clone, Default)]
pub struct StaticCalendar {
    entries: Vec<BusyInterval>,
}

impl StaticCalendar {
    pub fn new(entries: Vec<BusyInterval>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[BusyInterval] {
        &self.entries
    }
}

impl CalendarSource for StaticCalendar {
    /// Entries overlapping the window, plus malformed ones (which a provider
    /// would also return and the engine skips later).
    fn busy_intervals(&self, window: &TimeInterval) -> Result<Vec<BusyInterval>> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| match entry.as_interval() {
                Some(interval) => interval.overlaps(window),
                None => true,
            })
            .cloned()
            .collect())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EventListing {
    Bare(Vec<RawEvent>),
    Wrapped {
        #[serde(default)]
        items: Vec<RawEvent>,
    },
}

#[derive(Deserialize)]
struct RawEvent {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    start: Value,
    #[serde(default)]
    end: Value,
}

/// Read one event boundary: `"<ISO>"` or `{ "dateTime": "<ISO>" }`.
///
/// All-day boundaries (`{ "date": "2026-03-16" }`) and anything unparseable
/// come back as `None`.
fn parse_boundary(value: &Value) -> Option<chrono::DateTime<chrono::Utc>> {
    let raw = match value {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("dateTime")?.as_str()?,
        _ => return None,
    };
    parse_datetime(raw).ok()
}

/// Parse a provider event listing into busy entries.
///
/// Accepts `{ "items": [...] }` (Google Calendar's events.list shape) or a bare
/// array. Individual events with missing or unreadable boundaries are kept
/// with `None` instants so that downstream checks skip them.
///
/// # Errors
/// Returns `SlotError::CalendarPayload` if the document is not JSON of either shape.
pub fn parse_event_listing(json: &str) -> Result<Vec<BusyInterval>> {
    let listing: EventListing =
        serde_json::from_str(json).map_err(|e| SlotError::CalendarPayload(e.to_string()))?;
    let raw = match listing {
        EventListing::Bare(items) | EventListing::Wrapped { items } => items,
    };

    let entries: Vec<BusyInterval> = raw
        .into_iter()
        .map(|event| BusyInterval {
            id: event.id.map(|id| match id {
                Value::String(s) => s,
                other => other.to_string(),
            }),
            summary: event.summary,
            start: parse_boundary(&event.start),
            end: parse_boundary(&event.end),
        })
        .collect();

    let skipped = entries.iter().filter(|e| e.bounds().is_none()).count();
    if skipped > 0 {
        tracing::debug!(skipped, "calendar listing has entries without timed boundaries");
    }
    Ok(entries)
}

/// Fetch the proposal's window from `source` and check it for conflicts.
///
/// # Errors
/// Propagates the source's fetch error unchanged.
pub fn check_scheduling_conflicts(
    source: &impl CalendarSource,
    proposed: &TimeInterval,
) -> Result<ConflictStatus> {
    let busy = source.busy_intervals(proposed)?;
    Ok(ConflictStatus::check(&busy, proposed))
}

/// Fetch the query's whole local day from `source` and scan it for open slots.
///
/// # Errors
/// Propagates the source's fetch error unchanged. Returns
/// `SlotError::InvalidDateTime` if the day has no representable midnight in `tz`.
pub fn available_time_slots(
    source: &impl CalendarSource,
    query: &AvailabilityQuery,
    tz: Tz,
) -> Result<Vec<AvailableSlot>> {
    let window = query
        .day_window(tz)
        .ok_or_else(|| SlotError::InvalidDateTime(query.day.to_string()))?;
    let busy = source.busy_intervals(&window)?;
    Ok(find_available_slots(&busy, query, tz))
}
