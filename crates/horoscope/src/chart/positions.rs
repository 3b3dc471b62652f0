use crate::chart::data::{BirthData, ChartPositions, Position};
use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{ALL_BODIES, CARDINAL_ANGLES};

/// Resolves the ten bodies and four angles of a chart
pub struct PositionResolver<P> {
    provider: P,
}

impl<P: EphemerisProvider> PositionResolver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Bodies first in fixed order, then Ascendant, Descendant, Midheaven,
    /// Imum Coeli.
    pub fn resolve(&self, birth: &BirthData) -> Result<ChartPositions, EphemerisError> {
        let jd = birth.julian_day();
        let mut positions = ChartPositions::with_capacity(ALL_BODIES.len() + CARDINAL_ANGLES.len());

        for body in ALL_BODIES {
            let lon = self.provider.longitude(jd, body)?;
            positions.insert(body.name(), Position::from_longitude(lon));
        }

        let angles = self.provider.chart_angles(jd, birth.location())?;
        for angle in CARDINAL_ANGLES {
            positions.insert(angle.name(), Position::from_longitude(angles.get(angle)));
        }

        log::trace!("resolved {} positions at JD {}", positions.len(), jd);
        Ok(positions)
    }
}

/// Positions of all bodies and angles for a birth moment.
pub fn resolve_positions<P: EphemerisProvider>(
    provider: P,
    birth: &BirthData,
) -> Result<ChartPositions, EphemerisError> {
    PositionResolver::new(provider).resolve(birth)
}
