use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{Body, ChartAngles, GeoLocation};
use crate::western::zodiac::normalize_degrees;
use std::env;
use std::path::{Path, PathBuf};
use swisseph::swe::{calc_ut, houses_ex, set_ephe_path};

/// FLG_SWIEPH: use Swiss Ephemeris data files
const FLG_SWIEPH: i32 = 2;

/// Placidus, the house system the angles are read from
const HOUSE_SYSTEM_PLACIDUS: u8 = b'P';

const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

/// Swiss Ephemeris backed provider (tropical, geocentric)
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path.
    ///
    /// Without an explicit path, `SWISS_EPHEMERIS_PATH` is consulted before
    /// falling back to the system default location. The resolved directory
    /// is handed to the library, which keeps it process-wide.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        set_ephe_path(&path.to_string_lossy());
        log::debug!("Swiss Ephemeris data at {}", path.display());
        Ok(Self { ephemeris_path: path })
    }

    /// Directory the library reads its data files from.
    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn longitude(&self, julian_day: f64, body: Body) -> Result<f64, EphemerisError> {
        let result = calc_ut(julian_day, body.swiss_id() as u32, FLG_SWIEPH as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                body: body.name().to_string(),
                julian_day,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        Ok(normalize_degrees(result.out[0]))
    }

    fn chart_angles(
        &self,
        julian_day: f64,
        location: GeoLocation,
    ) -> Result<ChartAngles, EphemerisError> {
        let (_cusps, ascmc) = houses_ex(
            julian_day,
            FLG_SWIEPH,
            location.lat,
            location.lon,
            HOUSE_SYSTEM_PLACIDUS as i32,
        );

        let ascendant = ascmc[0];
        let midheaven = ascmc[1];
        if !ascendant.is_finite() || !midheaven.is_finite() {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!(
                    "non-finite angles at JD {} for lat {} lon {}",
                    julian_day, location.lat, location.lon
                ),
            });
        }

        Ok(ChartAngles {
            ascendant: normalize_degrees(ascendant),
            midheaven: normalize_degrees(midheaven),
        })
    }
}
