use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ephemeris::provider::EphemerisError;
use crate::ephemeris::types::{Body, CardinalAngle};
use crate::western::zodiac::Sign;

/// A body crossing one of the four cardinal angles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transit {
    pub body: Body,
    pub angle: CardinalAngle,
    /// Local civil time at the scan's UTC offset
    pub local_time: NaiveDateTime,
    /// Circular mean of body and angle longitude at the crossing
    pub longitude: f64,
    pub sign: Sign,
    pub degree_in_sign: f64,
    pub decan: u8,
}

#[derive(Error, Debug)]
pub enum TransitError {
    #[error("Planet {0} not supported. Supported bodies: Sun, Moon, Mercury, Venus, Mars, Jupiter, Saturn, Uranus, Neptune, Pluto")]
    UnsupportedBody(String),
    #[error("Invalid month {month} for year {year}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("Scan step must be at least one minute, got {0}")]
    InvalidStep(u32),
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
}
