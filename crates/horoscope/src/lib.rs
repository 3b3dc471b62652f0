//! Astrological chart computations.
//!
//! Positions and angles come from an [`EphemerisProvider`]; everything on
//! top of them (sign and decan resolution, aspects, cardinal-angle transits)
//! is computed here. The lunar phase model is self-contained.

pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod moon;
pub mod time;
pub mod transits;
pub mod western;

pub use aspects::{detect_aspects, Aspect, AspectCalculator, AspectType, DEFAULT_ORB};
pub use chart::{
    moon_direction, moon_lenormand_card, resolve_positions, BirthData, ChartPositions,
    MoonDirection, Position, PositionResolver,
};
pub use ephemeris::{
    Body, CardinalAngle, ChartAngles, EphemerisError, EphemerisProvider, GeoLocation,
    MeanMotionEphemeris, SwissEphemerisAdapter,
};
pub use moon::{month_moon_phases, moon_phase, MoonPhase, PhaseName};
pub use time::{to_julian_date, to_julian_day};
pub use transits::{scan_transits, Transit, TransitError, TransitScanner};
pub use western::{Sign, SignPlacement};
