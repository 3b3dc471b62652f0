//! Moon ascending/descending relative to the horizon axis.

use serde::{Deserialize, Serialize};

use crate::chart::data::ChartPositions;
use crate::ephemeris::types::{Body, CardinalAngle};
use crate::western::zodiac::normalize_degrees;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoonDirection {
    /// Between Ascendant and Descendant in zodiac order
    Ascending,
    /// Between Descendant and Ascendant
    Descending,
}

impl MoonDirection {
    pub fn description(self) -> &'static str {
        match self {
            MoonDirection::Ascending => "The Moon is in ascending phase (from Asc to Dsc).",
            MoonDirection::Descending => "The Moon is in descending phase (from Dsc to Asc).",
        }
    }
}

/// `None` when the chart lacks the Moon, Ascendant or Descendant.
pub fn moon_direction(positions: &ChartPositions) -> Option<MoonDirection> {
    let moon = positions.body(Body::Moon)?.absolute_longitude;
    let asc = positions.angle(CardinalAngle::Ascendant)?.absolute_longitude;
    let dsc = positions.angle(CardinalAngle::Descendant)?.absolute_longitude;

    let moon_from_asc = normalize_degrees(moon - asc);
    let dsc_from_asc = normalize_degrees(dsc - asc);

    if moon_from_asc < dsc_from_asc {
        Some(MoonDirection::Ascending)
    } else {
        Some(MoonDirection::Descending)
    }
}
