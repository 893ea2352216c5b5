use crate::error::{ConnTimeError, Result};
use chrono::{Datelike, Local, NaiveDate, TimeDelta};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Source of "today", so date resolution can be pinned in tests.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Resolve the inclusive lower bound for file selection.
///
/// An explicit date must be exactly `YYYY-MM-DD`. Without one, the Monday of
/// the clock's current week is used.
pub fn resolve_start_date(input: Option<&str>, clock: &impl Clock) -> Result<NaiveDate> {
    match input.filter(|s| !s.is_empty()) {
        Some(s) => parse_date(s).ok_or_else(|| ConnTimeError::InvalidDateFormat(s.to_string())),
        None => Ok(start_of_week(clock.today())),
    }
}

#[must_use]
pub fn start_of_week(day: NaiveDate) -> NaiveDate {
    day - TimeDelta::days(i64::from(day.weekday().num_days_from_monday()))
}

/// Parse a zero-padded `YYYY-MM-DD` date. chrono alone also accepts
/// unpadded fields and signed years, so the shape is checked first.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    let well_shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_shaped {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}
