//! Date and time shorthands.

use chrono::{NaiveDate, NaiveDateTime};

/// Monday used as the first draft date by the fixtures.
pub const DRAFT_START: (i32, u32, u32) = (2024, 3, 4);

/// Builds a date. Panics on an invalid date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Full hour on the given date.
pub fn at(d: NaiveDate, hour: u32) -> NaiveDateTime {
    at_hm(d, hour, 0)
}

pub fn at_hm(d: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    d.and_hms_opt(hour, minute, 0).expect("valid time")
}

/// The fixtures' first draft date.
pub fn draft_start() -> NaiveDate {
    date(DRAFT_START.0, DRAFT_START.1, DRAFT_START.2)
}

/// Date `days` after the first draft date (negative for before).
pub fn draft_day(days: i64) -> NaiveDate {
    draft_start() + chrono::Duration::days(days)
}
