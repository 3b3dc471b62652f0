use anyhow::Context;
use chrono::NaiveTime;
use horoscope::ephemeris::Body;
use horoscope::DEFAULT_ORB;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Tried in order when no explicit path is given.
pub const CONFIG_PATHS: [&str; 2] = ["configs/horoscope.toml", "../../configs/horoscope.toml"];

pub const MAX_STEP_MINUTES: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EphemerisBackend {
    /// Swiss Ephemeris data files
    #[default]
    Swiss,
    /// Built-in mean-motion model, no files needed
    Mean,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoroscopeSettings {
    pub backend: EphemerisBackend,
    /// `None` leaves the choice to `SWISS_EPHEMERIS_PATH` or the system default
    pub ephemeris_path: Option<PathBuf>,
    pub orb: f64,
    pub transit_body: Body,
    pub step_minutes: u32,
    /// UT time of day at which each day of a month of lunar phases is sampled
    pub moon_time_of_day: NaiveTime,
}

impl Default for HoroscopeSettings {
    fn default() -> Self {
        Self {
            backend: EphemerisBackend::Swiss,
            ephemeris_path: None,
            orb: DEFAULT_ORB,
            transit_body: Body::Moon,
            step_minutes: horoscope::transits::DEFAULT_STEP_MINUTES,
            moon_time_of_day: NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EphemerisToml {
    #[serde(default)]
    backend: EphemerisBackend,
    #[serde(default)]
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct AspectsToml {
    #[serde(default = "default_orb")]
    orb: f64,
}

impl Default for AspectsToml {
    fn default() -> Self {
        Self { orb: default_orb() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct TransitsToml {
    #[serde(default = "default_body")]
    body: String,
    #[serde(default = "default_step_minutes")]
    step_minutes: u32,
}

impl Default for TransitsToml {
    fn default() -> Self {
        Self { body: default_body(), step_minutes: default_step_minutes() }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct MoonToml {
    #[serde(default = "default_time_of_day")]
    time_of_day: String,
}

impl Default for MoonToml {
    fn default() -> Self {
        Self { time_of_day: default_time_of_day() }
    }
}

fn default_orb() -> f64 {
    DEFAULT_ORB
}

fn default_body() -> String {
    "Moon".to_string()
}

fn default_step_minutes() -> u32 {
    horoscope::transits::DEFAULT_STEP_MINUTES
}

fn default_time_of_day() -> String {
    "12:00:00".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: EphemerisToml,
    #[serde(default)]
    aspects: AspectsToml,
    #[serde(default)]
    transits: TransitsToml,
    #[serde(default)]
    moon: MoonToml,
}

/// Contents of the config file, `None` when no candidate path exists.
///
/// An explicit path must exist; the default candidates are optional.
pub fn read_config_text(explicit: Option<&Path>) -> anyhow::Result<Option<String>> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        return Ok(Some(text));
    }
    for p in &CONFIG_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            log::debug!("loaded config from {}", p);
            return Ok(Some(text));
        }
    }
    Ok(None)
}

pub fn parse_settings(text: &str) -> anyhow::Result<HoroscopeSettings> {
    let root: RootConfigToml =
        toml::from_str(text).context("Failed to parse horoscope.toml")?;
    let RootConfigToml { ephemeris, aspects, transits, moon } = root;

    if !(aspects.orb.is_finite() && aspects.orb > 0.0) {
        anyhow::bail!("aspects.orb must be a positive number of degrees, got {}", aspects.orb);
    }
    if !(1..=MAX_STEP_MINUTES).contains(&transits.step_minutes) {
        anyhow::bail!(
            "transits.step_minutes must be between 1 and {}, got {}",
            MAX_STEP_MINUTES,
            transits.step_minutes
        );
    }
    let transit_body: Body = transits
        .body
        .parse()
        .with_context(|| format!("transits.body {:?} is not a supported body", transits.body))?;
    let moon_time_of_day = NaiveTime::parse_from_str(&moon.time_of_day, "%H:%M:%S")
        .with_context(|| format!("moon.time_of_day {:?} is not HH:MM:SS", moon.time_of_day))?;

    Ok(HoroscopeSettings {
        backend: ephemeris.backend,
        ephemeris_path: ephemeris.path,
        orb: aspects.orb,
        transit_body,
        step_minutes: transits.step_minutes,
        moon_time_of_day,
    })
}

/// Settings from `explicit` or the first default path found; defaults when
/// neither exists.
pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<HoroscopeSettings> {
    match read_config_text(explicit)? {
        Some(text) => parse_settings(&text),
        None => {
            log::debug!("no horoscope.toml found in {:?}, using defaults", CONFIG_PATHS);
            Ok(HoroscopeSettings::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings, HoroscopeSettings::default());
        assert_eq!(settings.orb, 6.0);
        assert_eq!(settings.step_minutes, 15);
        assert_eq!(settings.transit_body, Body::Moon);
        assert_eq!(settings.moon_time_of_day, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn test_full_file() {
        let text = r#"
[ephemeris]
backend = "mean"
path = "/opt/ephe"

[aspects]
orb = 8.5

[transits]
body = "sun"
step_minutes = 30

[moon]
time_of_day = "06:30:00"
"#;
        let settings = parse_settings(text).unwrap();
        assert_eq!(settings.backend, EphemerisBackend::Mean);
        assert_eq!(settings.ephemeris_path, Some(PathBuf::from("/opt/ephe")));
        assert_eq!(settings.orb, 8.5);
        assert_eq!(settings.transit_body, Body::Sun);
        assert_eq!(settings.step_minutes, 30);
        assert_eq!(settings.moon_time_of_day, NaiveTime::from_hms_opt(6, 30, 0).unwrap());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let settings = parse_settings("[transits]\nstep_minutes = 5\n").unwrap();
        assert_eq!(settings.step_minutes, 5);
        assert_eq!(settings.transit_body, Body::Moon);
        assert_eq!(settings.backend, EphemerisBackend::Swiss);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(parse_settings("[aspects]\norb = 0.0\n").is_err());
        assert!(parse_settings("[aspects]\norb = -3.0\n").is_err());
        assert!(parse_settings("[transits]\nstep_minutes = 0\n").is_err());
        assert!(parse_settings("[transits]\nstep_minutes = 61\n").is_err());
        assert!(parse_settings("[transits]\nbody = \"Chiron\"\n").is_err());
        assert!(parse_settings("[moon]\ntime_of_day = \"noon\"\n").is_err());
        assert!(parse_settings("[ephemeris]\nbackend = \"jpl\"\n").is_err());
    }

    #[test]
    fn test_malformed_toml_mentions_file() {
        let err = parse_settings("[aspects\norb = 6").unwrap_err();
        assert!(format!("{:#}", err).contains("horoscope.toml"));
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let err = load_settings(Some(Path::new("/nonexistent/horoscope.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/horoscope.toml"));
    }
}
