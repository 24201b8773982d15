//! Pure date/time formatting and parsing. Display strings are for rendering
//! only; every comparison in the stores and the engine happens on the raw
//! `NaiveDate`/`NaiveTime` values.

use crate::error::{BookingError, Result};
use chrono::{Local, NaiveDate, NaiveTime};

/// `2999-01-10` -> `10/01/2999`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// 24-hour time to 12-hour display: `09:00` -> `9:00 AM`, `00:30` -> `12:30 AM`,
/// `12:05` -> `12:05 PM`.
pub fn format_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| BookingError::InvalidDate(raw.to_string()))
}

pub fn parse_time(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| BookingError::InvalidTime(raw.to_string()))
}

/// Day-granularity check against the host-local calendar date.
pub fn is_future_or_today(date: NaiveDate) -> bool {
    date >= Local::now().date_naive()
}
