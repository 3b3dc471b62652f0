pub mod adapter;
pub mod mean;
pub mod provider;
pub mod types;

pub use adapter::SwissEphemerisAdapter;
pub use mean::MeanMotionEphemeris;
pub use provider::{EphemerisError, EphemerisProvider};
pub use types::{
    Body, CardinalAngle, ChartAngles, GeoLocation, ParseBodyError, ALL_BODIES, CARDINAL_ANGLES,
};
