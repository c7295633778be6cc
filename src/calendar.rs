//! # Calendar Helpers
//!
//! Day-of-year arithmetic and conversions between a station's local standard
//! time and the "hours since 1 January 00:00 UTC" scale the harmonic tables
//! are referenced to.
//!
//! Clock readings are always local *standard* time. Daylight saving is never
//! applied; a clock left on summer time will predict one hour off.

use crate::error::TideError;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Gregorian leap year rule: divisible by 4, except centuries not divisible by 400.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`.
pub fn days_in_month(month: u32, year: i32) -> Option<u32> {
    let days = *DAYS_IN_MONTH.get(month.checked_sub(1)? as usize)?;
    Some(if month == 2 && is_leap_year(year) {
        29
    } else {
        days
    })
}

/// Day of year (1 = 1 January) for a day, month and four-digit year.
///
/// Raw RTC registers can hold anything, so every field is checked:
/// years below 1000, months outside 1-12 and days past the end of the
/// month are rejected with [`TideError::InvalidDate`].
///
/// # Example
/// ```
/// use tide_calc_lib::calendar::day_of_year;
///
/// assert_eq!(day_of_year(1, 3, 2016).unwrap(), 61);
/// assert!(day_of_year(29, 2, 2017).is_err());
/// ```
pub fn day_of_year(day: u32, month: u32, year: i32) -> Result<u32, TideError> {
    let invalid = TideError::InvalidDate { year, month, day };
    if year < 1000 {
        return Err(invalid);
    }
    let month_len = days_in_month(month, year).ok_or_else(|| invalid.clone())?;
    if day < 1 || day > month_len {
        return Err(invalid);
    }

    let before: u32 = (1..month)
        .filter_map(|m| days_in_month(m, year))
        .sum();
    Ok(before + day)
}

/// Offset of local standard time from UTC as a chrono duration.
fn offset(utc_offset_hours: f64) -> Duration {
    Duration::seconds((utc_offset_hours * 3600.0).round() as i64)
}

/// Convert a local standard time reading to a UTC instant.
pub fn local_to_utc(local: NaiveDateTime, utc_offset_hours: f64) -> DateTime<Utc> {
    Utc.from_utc_datetime(&(local - offset(utc_offset_hours)))
}

/// Convert a UTC instant back to local standard time.
pub fn utc_to_local(instant: DateTime<Utc>, utc_offset_hours: f64) -> NaiveDateTime {
    instant.naive_utc() + offset(utc_offset_hours)
}

/// 00:00:00 UTC on 1 January of `year`.
pub fn year_start(year: i32) -> DateTime<Utc> {
    // 1 January always exists for the years chrono can represent
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Hours elapsed between the start of `year` (UTC) and `instant`.
///
/// Negative when `instant` precedes the year start.
pub fn hours_since_year_start(instant: DateTime<Utc>, year: i32) -> f64 {
    let elapsed = instant - year_start(year);
    elapsed.num_milliseconds() as f64 / 3_600_000.0
}

/// Inverse of [`hours_since_year_start`], rounded to the nearest second.
pub fn instant_from_hours(hours: f64, year: i32) -> DateTime<Utc> {
    year_start(year) + Duration::seconds((hours * 3600.0).round() as i64)
}

/// Reference year for an instant: the UTC calendar year it falls in.
pub fn utc_year(instant: DateTime<Utc>) -> i32 {
    instant.year()
}
