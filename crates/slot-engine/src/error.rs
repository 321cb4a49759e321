//! Error types for slot-engine operations.
//!
//! The pure computations (suggestions, conflicts, availability) degrade to empty
//! results instead of returning these; errors surface from constructors, config
//! parsing and calendar fetching.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid datetime '{0}'")]
    InvalidDateTime(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// The calendar event listing was not a recognizable JSON document.
    #[error("Invalid calendar payload: {0}")]
    CalendarPayload(String),

    /// The external calendar could not be read. Never absorbed by the engine.
    #[error("Calendar fetch failed: {0}")]
    CalendarFetch(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
