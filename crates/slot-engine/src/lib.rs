//! # slot-engine
//!
//! Meeting-time computations for the SAi Meeting scheduler.
//!
//! Everything here is a pure, synchronous function over data the caller has
//! already fetched: the engine performs no I/O and keeps no state between
//! calls. Calendar access goes through the [`calendar::CalendarSource`] seam,
//! whose failures are returned to the caller as-is.
//!
//! ## Modules
//!
//! - [`suggest`] — Randomly sampled candidate slots with one recommendation
//! - [`conflict`] — Busy entries overlapping a proposed meeting
//! - [`availability`] — Open slots within a day's working hours
//! - [`calendar`] — Event-listing parsing and the calendar fetch seam
//! - [`meetings`] — Merging and ordering a user's meeting lists
//! - [`interval`] — `TimeInterval` and `BusyInterval`
//! - [`config`] — Bands, working hours and tolerances
//! - [`time`] — Datetime parsing and wall-clock helpers
//! - [`error`] — Error types

pub mod availability;
pub mod calendar;
pub mod config;
pub mod conflict;
pub mod error;
pub mod interval;
pub mod meetings;
pub mod suggest;
pub mod time;

pub use availability::{find_available_slots, AvailabilityQuery, AvailableSlot};
pub use calendar::{
    available_time_slots, check_scheduling_conflicts, parse_event_listing, CalendarSource,
    StaticCalendar,
};
pub use config::{EngineConfig, WorkingHours, NEAR_COINCIDENCE_TOLERANCE_MS};
pub use conflict::{find_conflicts, ConflictStatus};
pub use error::SlotError;
pub use interval::{BusyInterval, TimeInterval};
pub use meetings::{merge_user_meetings, upcoming_meetings, Meeting, Organizer};
pub use suggest::{generate_suggestions, CandidateSlot, SchedulingRequest, SuggestionGenerator};
