//! Time utilities: parsing HH:MM, 15-minute grid rounding, duration helpers.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveTime, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

pub fn parse_date(d: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(d.to_string()))
}

pub fn require_time(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

pub fn minutes_between(start: NaiveTime, end: NaiveTime) -> i64 {
    (end - start).num_minutes()
}

pub fn format_minutes(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{:02}:{:02}", sign, m / 60, m % 60)
}

/// Minutes since midnight, ignoring seconds.
pub fn to_minutes(t: NaiveTime) -> i64 {
    (t.hour() * 60 + t.minute()) as i64
}

/// Back from minutes since midnight. Values are clamped to the same day.
pub fn from_minutes(mins: i64) -> NaiveTime {
    let m = mins.clamp(0, 23 * 60 + 59);
    NaiveTime::from_hms_opt((m / 60) as u32, (m % 60) as u32, 0).unwrap()
}

/// Round a minute count to the nearest multiple of 15, ties rounding up.
pub fn round_quarter(mins: i64) -> i64 {
    if mins <= 0 {
        return 0;
    }
    ((mins + 7) / 15) * 15
}

/// Snap a time of day to the 15-minute grid (nearest, ties up).
pub fn snap_to_quarter(t: NaiveTime) -> NaiveTime {
    let rounded = round_quarter(to_minutes(t));
    // 23:53..=23:59 would round past midnight; pin to the last grid slot
    from_minutes(rounded.min(23 * 60 + 45))
}
