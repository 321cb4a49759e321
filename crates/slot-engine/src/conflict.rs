//! Check a proposed meeting against a calendar's busy entries.
//!
//! Adjacent entries (one ends exactly when the proposal starts, or vice versa)
//! are NOT conflicts. Entries missing either instant are skipped.

use serde::{Deserialize, Serialize};

use crate::interval::{BusyInterval, TimeInterval};

/// Find the busy entries that overlap `proposed`, in input order.
///
/// An entry conflicts iff `entry.start < proposed.end && entry.end > proposed.start`.
/// Returns `None` rather than an empty list when nothing conflicts.
pub fn find_conflicts(busy: &[BusyInterval], proposed: &TimeInterval) -> Option<Vec<BusyInterval>> {
    let conflicts: Vec<BusyInterval> = busy
        .iter()
        .filter(|entry| match entry.bounds() {
            Some((start, end)) => start < proposed.end() && end > proposed.start(),
            None => false,
        })
        .cloned()
        .collect();

    tracing::debug!(
        checked = busy.len(),
        conflicts = conflicts.len(),
        "checked proposed interval against calendar"
    );

    if conflicts.is_empty() {
        None
    } else {
        Some(conflicts)
    }
}

/// Outcome of a conflict check, keeping "never checked" apart from "clear".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "conflicts", rename_all = "snake_case")]
pub enum ConflictStatus {
    #[default]
    NotChecked,
    Clear,
    Conflicting(Vec<BusyInterval>),
}

impl ConflictStatus {
    pub fn check(busy: &[BusyInterval], proposed: &TimeInterval) -> Self {
        find_conflicts(busy, proposed).into()
    }

    pub fn is_checked(&self) -> bool {
        !matches!(self, ConflictStatus::NotChecked)
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, ConflictStatus::Clear)
    }

    /// The conflicting entries; empty unless the status is `Conflicting`.
    pub fn conflicts(&self) -> &[BusyInterval] {
        match self {
            ConflictStatus::Conflicting(entries) => entries,
            _ => &[],
        }
    }
}

impl From<Option<Vec<BusyInterval>>> for ConflictStatus {
    fn from(found: Option<Vec<BusyInterval>>) -> Self {
        match found {
            Some(entries) => ConflictStatus::Conflicting(entries),
            None => ConflictStatus::Clear,
        }
    }
}
