//! Low-precision analytic provider.
//!
//! Longitudes come from mean elements at J2000 advanced at their mean daily
//! motion, with the leading equation-of-centre term for the Sun and the
//! Moon. Planets move on circular orbits at their mean heliocentric
//! longitude and are then seen from the Earth, which keeps Mercury and Venus
//! within their greatest elongation of the Sun. Without eccentricity or
//! inclination a planet can still be off by several degrees (Mars, near
//! opposition, by up to about 20°). The Sun is good to about 0.01°, the Moon
//! to a few degrees. Angles use GMST and the mean obliquity and are accurate
//! to well under a degree.
//!
//! Needs no data files and is fully deterministic, which makes it the
//! offline fallback and the provider used by the test suite.

use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{Body, ChartAngles, GeoLocation};
use crate::time::J2000;
use crate::western::zodiac::normalize_degrees;

const DAYS_PER_CENTURY: f64 = 36_525.0;

struct MeanElements {
    /// Mean longitude at J2000 (degrees)
    longitude: f64,
    /// Mean motion (degrees per day)
    motion: f64,
    /// Mean anomaly at J2000 and its rate, plus equation-of-centre amplitude
    anomaly: f64,
    anomaly_rate: f64,
    centre: f64,
    /// Orbit radius in AU; zero for longitudes that are already geocentric
    radius: f64,
}

const fn elements(
    longitude: f64,
    motion: f64,
    anomaly: f64,
    anomaly_rate: f64,
    centre: f64,
    radius: f64,
) -> MeanElements {
    MeanElements { longitude, motion, anomaly, anomaly_rate, centre, radius }
}

/// Indexed by `Body as usize`
const MEAN_ELEMENTS: [MeanElements; 10] = [
    elements(280.46646, 0.985_647_36, 357.52911, 0.985_600_28, 1.914_602, 0.0),
    elements(218.3165, 13.176_396_48, 134.9634, 13.064_992_95, 6.289, 0.0),
    elements(252.2509, 4.092_334_45, 0.0, 0.0, 0.0, 0.387_098),
    elements(181.9798, 1.602_130_34, 0.0, 0.0, 0.0, 0.723_330),
    elements(355.4330, 0.524_020_68, 0.0, 0.0, 0.0, 1.523_688),
    elements(34.3515, 0.083_085_29, 0.0, 0.0, 0.0, 5.202_603),
    elements(50.0774, 0.033_444_14, 0.0, 0.0, 0.0, 9.554_909),
    elements(314.0550, 0.011_728_34, 0.0, 0.0, 0.0, 19.218_446),
    elements(304.3487, 0.005_981_03, 0.0, 0.0, 0.0, 30.110_387),
    elements(238.9290, 0.003_970_00, 0.0, 0.0, 0.0, 39.482_117),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct MeanMotionEphemeris;

impl MeanMotionEphemeris {
    pub fn new() -> Self {
        Self
    }
}

impl EphemerisProvider for MeanMotionEphemeris {
    fn longitude(&self, julian_day: f64, body: Body) -> Result<f64, EphemerisError> {
        if !julian_day.is_finite() {
            return Err(EphemerisError::CalculationFailed {
                body: body.name().to_string(),
                julian_day,
                message: "non-finite Julian Day".to_string(),
            });
        }

        let el = &MEAN_ELEMENTS[body as usize];
        let own = orbital_longitude(el, julian_day);
        if el.radius == 0.0 {
            return Ok(own);
        }

        // Planet minus Earth, with the Earth opposite the Sun at 1 AU
        let sun = orbital_longitude(&MEAN_ELEMENTS[Body::Sun as usize], julian_day).to_radians();
        let own = own.to_radians();
        let x = el.radius * own.cos() + sun.cos();
        let y = el.radius * own.sin() + sun.sin();
        Ok(normalize_degrees(y.atan2(x).to_degrees()))
    }

    fn chart_angles(
        &self,
        julian_day: f64,
        location: GeoLocation,
    ) -> Result<ChartAngles, EphemerisError> {
        if !julian_day.is_finite() || location.lat.abs() >= 90.0 {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!(
                    "cannot derive angles at JD {} for latitude {}",
                    julian_day, location.lat
                ),
            });
        }

        let d = julian_day - J2000;
        let t = d / DAYS_PER_CENTURY;
        let local_sidereal = normalize_degrees(greenwich_mean_sidereal_degrees(julian_day) + location.lon);

        Ok(angles_from_sidereal_time(
            local_sidereal,
            location.lat,
            mean_obliquity_degrees(t),
        ))
    }
}

/// Mean longitude plus the leading equation-of-centre term, in the frame
/// the row is given in.
fn orbital_longitude(el: &MeanElements, julian_day: f64) -> f64 {
    let d = julian_day - J2000;
    let mean = el.longitude + el.motion * d;
    let anomaly = (el.anomaly + el.anomaly_rate * d).to_radians();
    normalize_degrees(mean + el.centre * anomaly.sin())
}

/// Greenwich mean sidereal time in degrees (IAU 1982 polynomial).
pub fn greenwich_mean_sidereal_degrees(julian_day: f64) -> f64 {
    let d = julian_day - J2000;
    let t = d / DAYS_PER_CENTURY;
    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * d + 0.000_387_933 * t * t - t * t * t / 38_710_000.0,
    )
}

/// Mean obliquity of the ecliptic in degrees, `t` in Julian centuries from J2000.
pub fn mean_obliquity_degrees(t: f64) -> f64 {
    23.439_291_1 - 0.013_004_2 * t
}

/// Ascendant and midheaven from local sidereal time (RAMC), latitude and
/// obliquity, all in degrees.
pub fn angles_from_sidereal_time(
    local_sidereal: f64,
    latitude: f64,
    obliquity: f64,
) -> ChartAngles {
    let ramc = local_sidereal.to_radians();
    let eps = obliquity.to_radians();
    let phi = latitude.to_radians();

    let midheaven = ramc.sin().atan2(ramc.cos() * eps.cos()).to_degrees();
    let ascendant = ramc
        .cos()
        .atan2(-(ramc.sin() * eps.cos() + phi.tan() * eps.sin()))
        .to_degrees();

    ChartAngles {
        ascendant: normalize_degrees(ascendant),
        midheaven: normalize_degrees(midheaven),
    }
}
