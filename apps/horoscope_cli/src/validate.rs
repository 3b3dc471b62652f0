//! Input ranges accepted by the command line, checked before any
//! computation runs.

use chrono::NaiveDate;
use horoscope::ephemeris::{Body, ALL_BODIES};

pub use horoscope_config::MAX_STEP_MINUTES;

pub const MIN_TRANSIT_YEAR: i32 = 1900;
pub const MAX_TRANSIT_YEAR: i32 = 2100;

pub fn check_date(year: i32, month: u32, day: u32) -> anyhow::Result<()> {
    if !(1..=12).contains(&month) {
        anyhow::bail!("Month must be between 1 and 12");
    }
    if !(1..=31).contains(&day) {
        anyhow::bail!("Day must be between 1 and 31");
    }
    if NaiveDate::from_ymd_opt(year, month, day).is_none() {
        anyhow::bail!("Date {}-{:02}-{:02} does not exist", year, month, day);
    }
    Ok(())
}

pub fn check_time(hour: u32, minute: u32, second: u32) -> anyhow::Result<()> {
    if hour > 23 {
        anyhow::bail!("Hour must be between 0 and 23");
    }
    if minute > 59 {
        anyhow::bail!("Minute must be between 0 and 59");
    }
    if second > 59 {
        anyhow::bail!("Second must be between 0 and 59");
    }
    Ok(())
}

pub fn check_location(latitude: f64, longitude: f64, tz_offset_hours: f64) -> anyhow::Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        anyhow::bail!("Latitude must be a number between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        anyhow::bail!("Longitude must be a number between -180 and 180");
    }
    if !(-12.0..=14.0).contains(&tz_offset_hours) {
        anyhow::bail!("Timezone offset must be a number between -12 and 14");
    }
    Ok(())
}

pub fn check_transit_year(year: i32) -> anyhow::Result<()> {
    if !(MIN_TRANSIT_YEAR..=MAX_TRANSIT_YEAR).contains(&year) {
        anyhow::bail!(
            "Year must be an integer between {} and {}",
            MIN_TRANSIT_YEAR,
            MAX_TRANSIT_YEAR
        );
    }
    Ok(())
}

pub fn check_step_minutes(step_minutes: u32) -> anyhow::Result<()> {
    if !(1..=MAX_STEP_MINUTES).contains(&step_minutes) {
        anyhow::bail!("Step minutes must be an integer between 1 and {}", MAX_STEP_MINUTES);
    }
    Ok(())
}

pub fn check_body(name: &str) -> anyhow::Result<Body> {
    name.parse().map_err(|_| {
        let names: Vec<&str> = ALL_BODIES.iter().map(|b| b.name()).collect();
        anyhow::anyhow!("Planet must be one of: {}", names.join(", "))
    })
}

pub fn check_orb(orb: f64) -> anyhow::Result<()> {
    if !(orb.is_finite() && orb > 0.0) {
        anyhow::bail!("Orb must be a positive number of degrees");
    }
    Ok(())
}
