//! Conversions between stored UTC instants and the portal's local wall clock.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Today's date on the portal clock.
pub fn today(now: DateTime<Utc>, offset: &FixedOffset) -> NaiveDate {
    now.with_timezone(offset).date_naive()
}

/// Parse a `datetime-local` input (`YYYY-MM-DDTHH:MM`, seconds tolerated).
pub fn parse_local_datetime(raw: &str, offset: &FixedOffset) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    let naive = NaiveDateTime::parse_from_str(raw, INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Value for a `datetime-local` input.
pub fn to_local_input(ts: &DateTime<Utc>, offset: &FixedOffset) -> String {
    ts.with_timezone(offset).format(INPUT_FORMAT).to_string()
}

/// Parse a `date` input (`YYYY-MM-DD`).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}
