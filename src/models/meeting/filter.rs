use chrono::{DateTime, Utc};

use crate::models::contains_ci;
use super::types::Meeting;

pub fn matches_search(m: &Meeting, search: &str) -> bool {
    contains_ci(&m.title, search)
        || m.title_en.as_deref().is_some_and(|t| contains_ci(t, search))
        || m.location.as_deref().is_some_and(|l| contains_ci(l, search))
}

pub fn is_upcoming(m: &Meeting, now: DateTime<Utc>) -> bool {
    m.meeting_date >= now
}

/// Split the searched list into (upcoming, past), keeping stored order.
pub fn partition<'a>(
    meetings: &'a [Meeting],
    search: &str,
    now: DateTime<Utc>,
) -> (Vec<&'a Meeting>, Vec<&'a Meeting>) {
    meetings
        .iter()
        .filter(|m| matches_search(m, search))
        .partition(|m| is_upcoming(m, now))
}
