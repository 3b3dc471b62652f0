use std::sync::{Mutex, MutexGuard};

use chrono::{NaiveDate, NaiveDateTime};
use horoscope::ephemeris::{
    Body, CardinalAngle, ChartAngles, EphemerisError, EphemerisProvider, GeoLocation,
    MeanMotionEphemeris,
};
use horoscope::transits::scan_transits;
use horoscope::western::normalize_degrees;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// 2025-01-01 06:20 UT
const DIP_CENTRE: f64 = 2_460_676.5 + (6.0 * 60.0 + 20.0) / 1440.0;

/// Fixed horizon (Ascendant 0°). The body's distance to the Ascendant is
/// u² - 0.5 with u in units of five minutes from 06:20, capped at 30°, so it
/// dips below zero between 06:16:28 and 06:23:32 only.
struct DipSky;

impl EphemerisProvider for DipSky {
    fn longitude(&self, julian_day: f64, _body: Body) -> Result<f64, EphemerisError> {
        let u = (julian_day - DIP_CENTRE) * 1440.0 / 5.0;
        Ok(normalize_degrees((u * u - 0.5).min(30.0)))
    }

    fn chart_angles(&self, _julian_day: f64, _location: GeoLocation) -> Result<ChartAngles, EphemerisError> {
        Ok(ChartAngles { ascendant: 0.0, midheaven: 270.0 })
    }
}

struct WarningLog;

static WARNINGS: Mutex<Vec<String>> = Mutex::new(Vec::new());
static SERIAL: Mutex<()> = Mutex::new(());
static LOGGER: WarningLog = WarningLog;

impl Log for WarningLog {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut warnings) = WARNINGS.lock() {
                warnings.push(record.args().to_string());
            }
        }
    }

    fn flush(&self) {}
}

/// Install the capturing logger and start from an empty buffer. Tests that
/// read warnings hold the guard so they do not see each other's output.
fn capture_warnings() -> MutexGuard<'static, ()> {
    let guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Warn);
    WARNINGS.lock().unwrap().clear();
    guard
}

fn warnings() -> Vec<String> {
    WARNINGS.lock().unwrap().clone()
}

fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|d| d.and_hms_opt(hour, minute, second))
        .unwrap()
}

#[test]
fn test_double_crossing_within_one_step_is_reported() {
    let _guard = capture_warnings();
    let transits = scan_transits(DipSky, 2025, 1, GeoLocation::new(0.0, 0.0), 0.0, "Sun", 15).unwrap();

    assert!(transits.is_empty());
    let warnings = warnings();
    assert_eq!(warnings.len(), 1, "{:?}", warnings);
    assert!(warnings[0].contains("Sun"));
    assert!(warnings[0].contains("Ascendant"));
    assert!(warnings[0].contains("2025-01-01 06:00:00"));
    assert!(warnings[0].contains("2025-01-01 06:30:00"));
}

#[test]
fn test_fine_step_resolves_both_crossings() {
    let _guard = capture_warnings();
    let transits = scan_transits(DipSky, 2025, 1, GeoLocation::new(0.0, 0.0), 0.0, "Sun", 1).unwrap();

    assert_eq!(transits.len(), 2);
    assert!(transits.iter().all(|t| t.angle == CardinalAngle::Ascendant));
    for (transit, expected) in transits.iter().zip([at(6, 16, 28), at(6, 23, 32)]) {
        let off = transit.local_time.signed_duration_since(expected).num_seconds().abs();
        assert!(off <= 30, "{} vs {}", transit.local_time, expected);
    }
    assert!(warnings().is_empty(), "{:?}", warnings());
}

#[test]
fn test_ordinary_scan_is_quiet() {
    let _guard = capture_warnings();
    let rome = GeoLocation::new(41.9028, 12.4964);
    let transits = scan_transits(MeanMotionEphemeris, 2025, 10, rome, 2.0, "Sun", 60).unwrap();

    assert!(!transits.is_empty());
    assert!(warnings().is_empty(), "{:?}", warnings());
}
