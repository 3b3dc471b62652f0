use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::western::zodiac::normalize_degrees;

/// Geographic location coordinates (degrees, east and north positive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLocation {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// The ten tracked bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

pub const ALL_BODIES: [Body; 10] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
];

impl Body {
    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }

    /// Swiss Ephemeris planet number (SE_SUN = 0 .. SE_PLUTO = 9)
    pub fn swiss_id(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown body: {0}")]
pub struct ParseBodyError(pub String);

impl FromStr for Body {
    type Err = ParseBodyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_BODIES
            .iter()
            .copied()
            .find(|body| body.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseBodyError(s.to_string()))
    }
}

/// The four cardinal chart angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardinalAngle {
    Ascendant,
    Descendant,
    Midheaven,
    #[serde(rename = "Imum Coeli")]
    ImumCoeli,
}

pub const CARDINAL_ANGLES: [CardinalAngle; 4] = [
    CardinalAngle::Ascendant,
    CardinalAngle::Descendant,
    CardinalAngle::Midheaven,
    CardinalAngle::ImumCoeli,
];

impl CardinalAngle {
    pub fn name(self) -> &'static str {
        match self {
            CardinalAngle::Ascendant => "Ascendant",
            CardinalAngle::Descendant => "Descendant",
            CardinalAngle::Midheaven => "Midheaven",
            CardinalAngle::ImumCoeli => "Imum Coeli",
        }
    }
}

impl fmt::Display for CardinalAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ascendant and midheaven as returned by a provider. The other two angles
/// sit opposite them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartAngles {
    pub ascendant: f64,
    pub midheaven: f64,
}

impl ChartAngles {
    pub fn descendant(&self) -> f64 {
        normalize_degrees(self.ascendant + 180.0)
    }

    pub fn imum_coeli(&self) -> f64 {
        normalize_degrees(self.midheaven + 180.0)
    }

    /// Longitude of one cardinal angle
    pub fn get(&self, angle: CardinalAngle) -> f64 {
        match angle {
            CardinalAngle::Ascendant => normalize_degrees(self.ascendant),
            CardinalAngle::Descendant => self.descendant(),
            CardinalAngle::Midheaven => normalize_degrees(self.midheaven),
            CardinalAngle::ImumCoeli => self.imum_coeli(),
        }
    }
}
