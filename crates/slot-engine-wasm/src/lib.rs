//! WASM bindings for slot-engine.
//!
//! Exposes suggestion sampling, conflict checks and availability scans to the
//! scheduling UI via `wasm-bindgen`. Calendar listings and results cross the
//! boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir web/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use slot_engine::time::{parse_datetime, parse_timezone};
use slot_engine::{AvailabilityQuery, TimeInterval};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Sample candidate meeting times around a reference date.
///
/// Returns a JSON array of `{label, interval: {start, end}, recommended}`.
/// An unreadable `reference` yields `"[]"`. The browser has no OS entropy
/// available to the engine, so the caller passes a seed (e.g. from
/// `crypto.getRandomValues`).
///
/// # Arguments
/// - `reference` -- "YYYY-MM-DD" or ISO 8601 datetime
/// - `duration_minutes` -- Meeting length
/// - `now` -- Current instant as ISO 8601 (e.g. `new Date().toISOString()`)
/// - `timezone` -- IANA timezone for bands and labels
/// - `seed` -- Random seed for the sample
#[wasm_bindgen(js_name = "suggestSlots")]
pub fn suggest_slots(
    reference: &str,
    duration_minutes: u32,
    now: &str,
    timezone: &str,
    seed: u64,
) -> Result<String, JsValue> {
    let tz = parse_timezone(timezone).map_err(js_err)?;
    let now = parse_datetime(now).map_err(js_err)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let slots = slot_engine::generate_suggestions(reference, duration_minutes, 3, now, tz, &mut rng);
    to_json(&slots)
}

/// List busy entries overlapping the proposed meeting.
///
/// `events_json` is a calendar listing (`{items: [...]}` or a bare array).
/// Returns a JSON array of conflicting entries, or `"null"` when none conflict.
#[wasm_bindgen(js_name = "findConflicts")]
pub fn find_conflicts(events_json: &str, start: &str, end: &str) -> Result<String, JsValue> {
    let busy = slot_engine::parse_event_listing(events_json).map_err(js_err)?;
    let proposed = TimeInterval::new(
        parse_datetime(start).map_err(js_err)?,
        parse_datetime(end).map_err(js_err)?,
    )
    .map_err(js_err)?;

    to_json(&slot_engine::find_conflicts(&busy, &proposed))
}

/// List open slots between 9:00 and 17:00 on `day` at 30-minute steps.
///
/// Returns a JSON array of `{start, end, formatted}` objects.
#[wasm_bindgen(js_name = "findAvailableSlots")]
pub fn find_available_slots(
    events_json: &str,
    day: &str,
    duration_minutes: u32,
    timezone: &str,
) -> Result<String, JsValue> {
    let busy = slot_engine::parse_event_listing(events_json).map_err(js_err)?;
    let day = NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid day '{}': {}", day, e)))?;
    let tz = parse_timezone(timezone).map_err(js_err)?;

    let query = AvailabilityQuery::new(day, duration_minutes);
    to_json(&slot_engine::find_available_slots(&busy, &query, tz))
}
