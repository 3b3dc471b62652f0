use crate::ephemeris::types::{Body, ChartAngles, GeoLocation};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {body} at JD {julian_day}: {message}")]
    CalculationFailed {
        body: String,
        julian_day: f64,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
}

/// Source of raw ecliptic positions.
///
/// Implementations must be deterministic: the same Julian Day and inputs
/// always yield the same longitudes. Longitudes are tropical, in degrees.
pub trait EphemerisProvider {
    /// Geocentric ecliptic longitude of `body` at `julian_day` (UT).
    fn longitude(&self, julian_day: f64, body: Body) -> Result<f64, EphemerisError>;

    /// Ascendant and midheaven longitudes for an observer at `location`.
    fn chart_angles(
        &self,
        julian_day: f64,
        location: GeoLocation,
    ) -> Result<ChartAngles, EphemerisError>;
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn longitude(&self, julian_day: f64, body: Body) -> Result<f64, EphemerisError> {
        (**self).longitude(julian_day, body)
    }

    fn chart_angles(
        &self,
        julian_day: f64,
        location: GeoLocation,
    ) -> Result<ChartAngles, EphemerisError> {
        (**self).chart_angles(julian_day, location)
    }
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for Box<P> {
    fn longitude(&self, julian_day: f64, body: Body) -> Result<f64, EphemerisError> {
        (**self).longitude(julian_day, body)
    }

    fn chart_angles(
        &self,
        julian_day: f64,
        location: GeoLocation,
    ) -> Result<ChartAngles, EphemerisError> {
        (**self).chart_angles(julian_day, location)
    }
}
