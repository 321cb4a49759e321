//! Candidate meeting times for the scheduling picker.
//!
//! Builds every slot that fits the morning and afternoon bands over a short
//! run of days, samples a handful uniformly at random and flags one of them as
//! recommended. The random source is injected so callers (and tests) decide
//! whether the sample is reproducible.

use chrono::{DateTime, Days, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, WorkingHours};
use crate::interval::TimeInterval;
use crate::time::{format_clock, format_day, local_instant, parse_reference};

/// Appended to the label of the recommended candidate.
pub const RECOMMENDED_SUFFIX: &str = " (Recommended)";

/// Input for one suggestion request.
///
/// `working_hours` clips the configured morning and afternoon bands: a band
/// hour outside it never yields a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingRequest {
    pub reference: DateTime<Utc>,
    pub duration_minutes: u32,
    pub day_window: u32,
    pub working_hours: WorkingHours,
}

impl SchedulingRequest {
    /// A request covering the default three-day window and 9:00-17:00 day.
    pub fn new(reference: DateTime<Utc>, duration_minutes: u32) -> Self {
        Self {
            reference,
            duration_minutes,
            day_window: 3,
            working_hours: WorkingHours::default(),
        }
    }

    pub fn with_day_window(mut self, day_window: u32) -> Self {
        self.day_window = day_window;
        self
    }

    pub fn with_working_hours(mut self, working_hours: WorkingHours) -> Self {
        self.working_hours = working_hours;
        self
    }
}

/// A proposed meeting time surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    /// e.g. "Tuesday, June 3, 2025 at 9:00 AM - 10:00 AM", with
    /// [`RECOMMENDED_SUFFIX`] appended when `recommended` is set.
    pub label: String,
    pub interval: TimeInterval,
    pub recommended: bool,
}

impl CandidateSlot {
    /// The label without the recommendation marker.
    pub fn base_label(&self) -> &str {
        self.label
            .strip_suffix(RECOMMENDED_SUFFIX)
            .unwrap_or(&self.label)
    }
}

#[derive(Debug, Clone)]
pub struct SuggestionGenerator {
    config: EngineConfig,
    tz: Tz,
}

impl SuggestionGenerator {
    pub fn new(config: EngineConfig, tz: Tz) -> Self {
        Self { config, tz }
    }

    /// The day generation starts from.
    ///
    /// A reference strictly before `now` is moved to `now + 1 day` rather than
    /// to `now`, so suggestions never start on a day that is already underway.
    pub fn anchor(&self, reference: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
        if reference < now {
            now.checked_add_signed(Duration::days(1)).unwrap_or(now)
        } else {
            reference
        }
    }

    /// Every candidate for the request in chronological order, none recommended.
    ///
    /// Starts step by whole hours inside each band (clipped to the request's
    /// working hours); a start is kept only if the requested duration still
    /// ends within the band.
    pub fn candidates(&self, request: &SchedulingRequest, now: DateTime<Utc>) -> Vec<CandidateSlot> {
        if request.duration_minutes == 0 {
            return Vec::new();
        }
        let duration = Duration::minutes(i64::from(request.duration_minutes));
        let first_day = self
            .anchor(request.reference, now)
            .with_timezone(&self.tz)
            .date_naive();

        let mut slots = Vec::new();
        for offset in 0..request.day_window {
            let Some(day) = first_day.checked_add_days(Days::new(u64::from(offset))) else {
                break;
            };
            for band in self.config.bands() {
                let band = WorkingHours::new(
                    band.start_hour.max(request.working_hours.start_hour),
                    band.end_hour.min(request.working_hours.end_hour),
                );
                if band.is_valid() {
                    self.push_band(&mut slots, day, band, duration);
                }
            }
        }
        slots
    }

    fn push_band(
        &self,
        slots: &mut Vec<CandidateSlot>,
        day: NaiveDate,
        band: WorkingHours,
        duration: Duration,
    ) {
        let Some(band_end) = local_instant(self.tz, day, band.end_hour, 0) else {
            return;
        };
        for hour in band.start_hour..band.end_hour {
            let Some(start) = local_instant(self.tz, day, hour, 0) else {
                continue;
            };
            let Some(end) = start.checked_add_signed(duration).filter(|end| *end <= band_end)
            else {
                break;
            };
            let Ok(interval) = TimeInterval::new(start, end) else {
                continue;
            };
            slots.push(CandidateSlot {
                label: self.label(&interval),
                interval,
                recommended: false,
            });
        }
    }

    fn label(&self, interval: &TimeInterval) -> String {
        format!(
            "{} at {} - {}",
            format_day(interval.start(), self.tz),
            format_clock(interval.start(), self.tz),
            format_clock(interval.end(), self.tz)
        )
    }

    /// Sample up to `suggestion_count` candidates and recommend one of them.
    ///
    /// The result keeps the shuffled order; exactly one slot is recommended
    /// whenever the result is non-empty.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        request: &SchedulingRequest,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Vec<CandidateSlot> {
        let mut pool = self.candidates(request, now);
        let generated = pool.len();

        pool.shuffle(rng);
        pool.truncate(self.config.suggestion_count);

        if !pool.is_empty() {
            let pick = rng.gen_range(0..pool.len());
            let slot = &mut pool[pick];
            slot.recommended = true;
            slot.label.push_str(RECOMMENDED_SUFFIX);
        }

        tracing::debug!(
            generated,
            selected = pool.len(),
            days = request.day_window,
            "generated meeting suggestions"
        );
        pool
    }
}

/// Suggest meeting times from a form-supplied reference date.
///
/// `reference` is a bare date ("2026-03-16", local midnight in `tz`) or an ISO
/// 8601 datetime. An unparseable reference yields no suggestions.
pub fn generate_suggestions<R: Rng + ?Sized>(
    reference: &str,
    duration_minutes: u32,
    day_window: u32,
    now: DateTime<Utc>,
    tz: Tz,
    rng: &mut R,
) -> Vec<CandidateSlot> {
    let reference = match parse_reference(reference, tz) {
        Ok(dt) => dt,
        Err(e) => {
            tracing::warn!(error = %e, "cannot suggest slots for reference date");
            return Vec::new();
        }
    };
    let request = SchedulingRequest::new(reference, duration_minutes).with_day_window(day_window);
    SuggestionGenerator::new(EngineConfig::default(), tz).generate(&request, now, rng)
}
