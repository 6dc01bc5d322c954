//! Calendar helpers: Gregorian date/time to Julian Date.
//!
//! Julian Dates are the uniform time axis for every propagation in the kernel.
//! Inputs are not validated; supplying a real calendar date is the caller's job.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use neo_core::constants::MJD_OFFSET;
use thiserror::Error;

/// Errors raised while interpreting user-supplied epochs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TimeError {
    #[error("invalid epoch `{epoch}`: expected YYYY-MM-DD, YYYY-MM-DDTHH:MM:SS, or a Julian Date")]
    InvalidEpoch { epoch: String },
}

/// Convert a Gregorian calendar date and time of day to a Julian Date.
///
/// January and February are treated as months 13 and 14 of the previous year.
/// The time-of-day fields may be fractional (`hour = 14.5` is 14:30).
pub fn to_julian_date(
    year: i32,
    month: u32,
    day: u32,
    hour: f64,
    minute: f64,
    second: f64,
) -> f64 {
    let (mut y, mut m) = (year as f64, month as f64);
    if month <= 2 {
        y -= 1.0;
        m += 12.0;
    }

    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    let day_fraction = (hour + (minute + second / 60.0) / 60.0) / 24.0;

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + day_fraction + b
        - 1524.5
}

/// Julian Date at 00:00 of the given calendar day.
pub fn julian_date(year: i32, month: u32, day: u32) -> f64 {
    to_julian_date(year, month, day, 0.0, 0.0, 0.0)
}

/// A Gregorian calendar instant, convenient when the time of day is optional.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarInstant {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl CalendarInstant {
    /// Midnight on the given date.
    pub fn date(year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0.0,
            minute: 0.0,
            second: 0.0,
        }
    }

    /// Same date at the given time of day.
    pub fn at(self, hour: f64, minute: f64, second: f64) -> Self {
        Self {
            hour,
            minute,
            second,
            ..self
        }
    }

    pub fn julian_date(&self) -> f64 {
        to_julian_date(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        )
    }
}

impl From<NaiveDateTime> for CalendarInstant {
    fn from(value: NaiveDateTime) -> Self {
        let second = value.second() as f64 + value.nanosecond() as f64 * 1e-9;
        CalendarInstant::date(value.year(), value.month(), value.day()).at(
            value.hour() as f64,
            value.minute() as f64,
            second,
        )
    }
}

/// Julian Date of a chrono timestamp (interpreted on the kernel's uniform time axis).
pub fn julian_date_from_datetime(datetime: &NaiveDateTime) -> f64 {
    CalendarInstant::from(*datetime).julian_date()
}

/// Convert a Julian Date to a Modified Julian Date.
#[inline]
pub fn to_modified_julian_date(jd: f64) -> f64 {
    jd - MJD_OFFSET
}

/// Convert a Modified Julian Date back to a Julian Date.
#[inline]
pub fn from_modified_julian_date(mjd: f64) -> f64 {
    mjd + MJD_OFFSET
}

/// Parse an epoch given either as a calendar string or as a bare Julian Date.
///
/// Accepted forms: `2025-11-04`, `2025-11-04T14:00:00`, `2025-11-04 14:00:00`,
/// and any finite number (taken as a JD).
pub fn parse_julian_date(input: &str) -> Result<f64, TimeError> {
    let trimmed = input.trim();
    if let Ok(jd) = trimmed.parse::<f64>() {
        if jd.is_finite() {
            return Ok(jd);
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(julian_date_from_datetime(&datetime));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(julian_date(date.year(), date.month(), date.day()));
    }
    Err(TimeError::InvalidEpoch {
        epoch: input.to_string(),
    })
}
