//! Meeting lists as shown on the dashboard.
//!
//! A user's meetings come from two queries against the meeting store: the ones
//! they organise and the ones they were invited to. These helpers combine and
//! order the two result sets.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    pub uid: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: DateTime<Utc>,
    /// The slot label picked when scheduling, e.g. a suggestion label.
    #[serde(default)]
    pub time_slot: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub participants: Vec<String>,
    pub organizer: Organizer,
}

impl Meeting {
    pub fn is_organized_by(&self, user_id: &str) -> bool {
        self.organizer.uid == user_id
    }
}

/// Union of a user's organised and invited meetings, newest first.
///
/// Invited meetings that the user also organises are dropped so each meeting
/// appears once. Meetings on the same date keep their input order.
pub fn merge_user_meetings(
    organized: Vec<Meeting>,
    participating: Vec<Meeting>,
    user_id: &str,
) -> Vec<Meeting> {
    let mut merged = organized;
    merged.extend(
        participating
            .into_iter()
            .filter(|meeting| !meeting.is_organized_by(user_id)),
    );
    merged.sort_by(|a, b| b.date.cmp(&a.date));
    merged
}

/// The `limit` soonest meetings at or after `now`, soonest first.
pub fn upcoming_meetings(meetings: &[Meeting], now: DateTime<Utc>, limit: usize) -> Vec<Meeting> {
    let mut upcoming: Vec<Meeting> = meetings
        .iter()
        .filter(|meeting| meeting.date >= now)
        .cloned()
        .collect();
    upcoming.sort_by_key(|meeting| meeting.date);
    upcoming.truncate(limit);
    upcoming
}
