//! Calendar to Julian Day conversion.
//!
//! All charts, scans and lunar phases share one continuous time scale: the
//! Julian Day under universal time. Inputs are assumed to be valid calendar
//! values; range checking belongs to the caller.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Julian Day of 2000-01-01 12:00 UT.
pub const J2000: f64 = 2_451_545.0;

/// Hours, minutes and seconds folded into decimal hours.
pub fn decimal_hours(hour: u32, minute: u32, second: f64) -> f64 {
    hour as f64 + minute as f64 / 60.0 + second / 3600.0
}

/// Julian Day (UT) for a local civil date and time at a fixed UTC offset.
///
/// The offset is subtracted from the local decimal time before the date is
/// combined, so a UT value outside 0..24 simply rolls into the neighbouring
/// day.
pub fn to_julian_day(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    tz_offset_hours: f64,
) -> f64 {
    let ut_hours = decimal_hours(hour, minute, second as f64) - tz_offset_hours;
    gregorian_julian_day(year, month, day as f64 + ut_hours / 24.0)
}

/// Julian Day (UT) for a UTC calendar instant.
pub fn to_julian_date(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> f64 {
    to_julian_day(year, month, day, hour, minute, second, 0.0)
}

/// Julian Day (UT) for a naive local timestamp, keeping sub-second precision.
pub fn local_to_julian_day(local: NaiveDateTime, tz_offset_hours: f64) -> f64 {
    let seconds = local.second() as f64 + local.nanosecond() as f64 / 1e9;
    let ut_hours = decimal_hours(local.hour(), local.minute(), seconds) - tz_offset_hours;
    gregorian_julian_day(local.year(), local.month(), local.day() as f64 + ut_hours / 24.0)
}

/// First local instants of `month` and of the month after it.
///
/// `None` for a month outside 1..=12 or a year chrono cannot represent.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start.and_hms_opt(0, 0, 0)?, next.and_hms_opt(0, 0, 0)?))
}

/// Number of days in a month, leap years included.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (start, end) = month_bounds(year, month)?;
    Some(end.signed_duration_since(start).num_days() as u32)
}

/// Meeus, Astronomical Algorithms ch. 7, Gregorian calendar branch.
/// `day` carries the fraction of the day.
fn gregorian_julian_day(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day + b - 1524.5
}
