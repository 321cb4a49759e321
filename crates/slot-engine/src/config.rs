//! Engine configuration: bands, working hours, sampling sizes and tolerances.
//!
//! Every field has a default, so a config document only needs the keys it
//! overrides:
//!
//! ```rust
//! use slot_engine::config::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{"suggestion_count": 4}"#).unwrap();
//! assert_eq!(config.suggestion_count, 4);
//! assert_eq!(config.day_window, 3);
//! ```

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::time::parse_timezone;

/// Two slot starts (or two slot ends) closer than this to a busy entry's start
/// (or end) count as a collision even if the overlap test passes.
pub const NEAR_COINCIDENCE_TOLERANCE_MS: i64 = 1_000;

/// A daily band of whole hours, `[start_hour, end_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl WorkingHours {
    pub const fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    /// `start_hour < end_hour <= 24`.
    pub fn is_valid(&self) -> bool {
        self.start_hour < self.end_hour && self.end_hour <= 24
    }
}

impl Default for WorkingHours {
    fn default() -> Self {
        Self::new(9, 17)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Consecutive days the suggestion generator covers.
    pub day_window: u32,
    /// How many candidates survive the random sample.
    pub suggestion_count: usize,
    pub morning_band: WorkingHours,
    pub afternoon_band: WorkingHours,
    /// Band scanned by the availability scanner.
    pub working_hours: WorkingHours,
    pub step_minutes: u32,
    pub coincidence_tolerance_ms: i64,
    /// IANA timezone used for wall-clock bands and labels.
    pub timezone: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            day_window: 3,
            suggestion_count: 6,
            morning_band: WorkingHours::new(9, 12),
            afternoon_band: WorkingHours::new(13, 17),
            working_hours: WorkingHours::default(),
            step_minutes: 30,
            coincidence_tolerance_ms: NEAR_COINCIDENCE_TOLERANCE_MS,
            timezone: "UTC".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse a JSON config document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| SlotError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, band) in [
            ("morning_band", self.morning_band),
            ("afternoon_band", self.afternoon_band),
            ("working_hours", self.working_hours),
        ] {
            if !band.is_valid() {
                return Err(SlotError::InvalidConfig(format!(
                    "{} must satisfy start_hour < end_hour <= 24 (got {}..{})",
                    name, band.start_hour, band.end_hour
                )));
            }
        }
        if self.step_minutes == 0 {
            return Err(SlotError::InvalidConfig(
                "step_minutes must be positive".to_string(),
            ));
        }
        if self.coincidence_tolerance_ms < 0 {
            return Err(SlotError::InvalidConfig(
                "coincidence_tolerance_ms must not be negative".to_string(),
            ));
        }
        self.tz().map(|_| ())
    }

    /// The configured timezone.
    ///
    /// # Errors
    /// Returns `SlotError::InvalidTimezone` if `timezone` is not an IANA identifier.
    pub fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }

    /// The suggestion bands in chronological order.
    pub fn bands(&self) -> [WorkingHours; 2] {
        [self.morning_band, self.afternoon_band]
    }
}
