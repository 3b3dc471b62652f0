//! Closed-form lunar phase model.
//!
//! The phase is the position within a mean synodic month counted from a
//! reference new moon. No ephemeris is consulted.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;

use crate::time::{days_in_month, to_julian_date};

/// Mean synodic month in days
pub const SYNODIC_MONTH: f64 = 29.530_588_853;

/// Julian Day of the reference new moon (2000-01-06 14:24 UT)
pub const NEW_MOON_EPOCH: f64 = 2_451_550.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseName {
    #[serde(rename = "New Moon")]
    NewMoon,
    #[serde(rename = "Waxing Crescent")]
    WaxingCrescent,
    #[serde(rename = "First Quarter")]
    FirstQuarter,
    #[serde(rename = "Waxing Gibbous")]
    WaxingGibbous,
    #[serde(rename = "Full Moon")]
    FullMoon,
    #[serde(rename = "Waning Gibbous")]
    WaningGibbous,
    #[serde(rename = "Last Quarter")]
    LastQuarter,
    #[serde(rename = "Waning Crescent")]
    WaningCrescent,
}

impl PhaseName {
    /// Sector of the cycle a fraction in [0, 1) falls into
    pub fn from_fraction(fraction: f64) -> Self {
        match fraction {
            f if f < 0.03 => PhaseName::NewMoon,
            f if f < 0.25 => PhaseName::WaxingCrescent,
            f if f < 0.27 => PhaseName::FirstQuarter,
            f if f < 0.50 => PhaseName::WaxingGibbous,
            f if f < 0.53 => PhaseName::FullMoon,
            f if f < 0.75 => PhaseName::WaningGibbous,
            f if f < 0.77 => PhaseName::LastQuarter,
            f if f < 0.97 => PhaseName::WaningCrescent,
            _ => PhaseName::NewMoon,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PhaseName::NewMoon => "New Moon",
            PhaseName::WaxingCrescent => "Waxing Crescent",
            PhaseName::FirstQuarter => "First Quarter",
            PhaseName::WaxingGibbous => "Waxing Gibbous",
            PhaseName::FullMoon => "Full Moon",
            PhaseName::WaningGibbous => "Waning Gibbous",
            PhaseName::LastQuarter => "Last Quarter",
            PhaseName::WaningCrescent => "Waning Crescent",
        }
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonPhase {
    pub julian_date: f64,
    /// Days since the last mean new moon, 0 <= x < 29.53
    pub age_days: f64,
    /// 0 <= x < 1
    pub fraction_of_cycle: f64,
    /// 0 (new) ..= 1 (full)
    pub illuminated_fraction: f64,
    pub phase_name: PhaseName,
}

impl MoonPhase {
    pub fn at_julian_date(julian_date: f64) -> Self {
        let cycles = (julian_date - NEW_MOON_EPOCH) / SYNODIC_MONTH;
        let mut fraction = cycles - cycles.floor();
        if fraction >= 1.0 {
            fraction = 0.0;
        }

        Self {
            julian_date,
            age_days: fraction * SYNODIC_MONTH,
            fraction_of_cycle: fraction,
            illuminated_fraction: (1.0 - (TAU * fraction).cos()) / 2.0,
            phase_name: PhaseName::from_fraction(fraction),
        }
    }
}

/// Phase at a UTC calendar instant.
pub fn moon_phase(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> MoonPhase {
    MoonPhase::at_julian_date(to_julian_date(year, month, day, hour, minute, second))
}

/// Phase at a UTC date and time of day.
pub fn moon_phase_on(date: NaiveDate, time: NaiveTime) -> MoonPhase {
    moon_phase(
        date.year(),
        date.month(),
        date.day(),
        time.hour(),
        time.minute(),
        time.second(),
    )
}

/// One phase per calendar day of the month at `time_of_day`, in date order.
///
/// Empty for a month outside 1..=12.
pub fn month_moon_phases(year: i32, month: u32, time_of_day: NaiveTime) -> Vec<MoonPhase> {
    let (Some(first), Some(days)) = (NaiveDate::from_ymd_opt(year, month, 1), days_in_month(year, month)) else {
        log::warn!("no such month {}-{:02}", year, month);
        return Vec::new();
    };

    (0..days as i64)
        .map(|offset| moon_phase_on(first + Duration::days(offset), time_of_day))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_is_new_moon() {
        let phase = MoonPhase::at_julian_date(NEW_MOON_EPOCH);
        assert_eq!(phase.fraction_of_cycle, 0.0);
        assert_eq!(phase.age_days, 0.0);
        assert_eq!(phase.illuminated_fraction, 0.0);
        assert_eq!(phase.phase_name, PhaseName::NewMoon);
    }

    #[test]
    fn test_mid_cycle_is_full() {
        let phase = MoonPhase::at_julian_date(NEW_MOON_EPOCH + SYNODIC_MONTH * 0.51);
        assert!((phase.fraction_of_cycle - 0.51).abs() < 1e-9);
        assert!(phase.illuminated_fraction > 0.99);
        assert_eq!(phase.phase_name, PhaseName::FullMoon);
    }

    #[test]
    fn test_before_epoch_stays_in_range() {
        let phase = MoonPhase::at_julian_date(NEW_MOON_EPOCH - 3.0);
        assert!(phase.fraction_of_cycle > 0.89 && phase.fraction_of_cycle < 1.0);
        assert_eq!(phase.phase_name, PhaseName::WaningCrescent);
    }

    #[test]
    fn test_phase_buckets() {
        let cases = [
            (0.0, PhaseName::NewMoon),
            (0.029, PhaseName::NewMoon),
            (0.03, PhaseName::WaxingCrescent),
            (0.25, PhaseName::FirstQuarter),
            (0.27, PhaseName::WaxingGibbous),
            (0.50, PhaseName::FullMoon),
            (0.53, PhaseName::WaningGibbous),
            (0.75, PhaseName::LastQuarter),
            (0.77, PhaseName::WaningCrescent),
            (0.97, PhaseName::NewMoon),
            (0.999, PhaseName::NewMoon),
        ];
        for (fraction, expected) in cases {
            assert_eq!(PhaseName::from_fraction(fraction), expected, "fraction {}", fraction);
        }
    }

    #[test]
    fn test_serialized_phase_name() {
        let json = serde_json::to_string(&PhaseName::WaxingGibbous).unwrap();
        assert_eq!(json, "\"Waxing Gibbous\"");
    }
}
