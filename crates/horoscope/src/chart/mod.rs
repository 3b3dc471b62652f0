pub mod data;
pub mod hemisphere;
pub mod positions;

pub use data::{BirthData, ChartPositions, Position};
pub use hemisphere::{moon_direction, MoonDirection};
pub use positions::{resolve_positions, PositionResolver};

use crate::ephemeris::types::Body;
use crate::western::lenormand::lenormand_card;

/// Lenormand card of the Moon's sign and decan, if the chart has a Moon.
pub fn moon_lenormand_card(positions: &ChartPositions) -> Option<&'static str> {
    let moon = positions.body(Body::Moon)?;
    lenormand_card(moon.sign, moon.decan)
}
