use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::ephemeris::types::{Body, CardinalAngle, GeoLocation};
use crate::time::to_julian_day;
use crate::western::zodiac::{decompose_longitude, Sign, SignPlacement};

/// Birth moment and place. Local civil time at a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone_offset_hours: f64,
}

impl BirthData {
    pub fn julian_day(&self) -> f64 {
        to_julian_day(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.timezone_offset_hours,
        )
    }

    pub fn location(&self) -> GeoLocation {
        GeoLocation::new(self.latitude, self.longitude)
    }
}

/// Resolved placement of a body or angle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub sign: Sign,
    /// 1, 2 or 3
    pub decan: u8,
    /// 0 <= x < 30
    pub degree_in_sign: f64,
    /// 0 <= x < 360
    pub absolute_longitude: f64,
}

impl Position {
    pub fn from_longitude(longitude: f64) -> Self {
        decompose_longitude(longitude).into()
    }
}

impl From<SignPlacement> for Position {
    fn from(p: SignPlacement) -> Self {
        Self {
            sign: p.sign,
            decan: p.decan,
            degree_in_sign: p.degree_in_sign,
            absolute_longitude: p.longitude,
        }
    }
}

/// Positions keyed by name, iterated in insertion order.
///
/// Aspect enumeration walks pairs in this order, so it is part of the
/// output contract.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartPositions {
    entries: Vec<(String, Position)>,
}

impl ChartPositions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity) }
    }

    /// Build from (name, longitude) pairs, decomposing each longitude.
    pub fn from_longitudes<I, S>(longitudes: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut positions = Self::new();
        for (name, lon) in longitudes {
            positions.insert(name, Position::from_longitude(lon));
        }
        positions
    }

    /// Insert or replace. Replacing keeps the original slot.
    pub fn insert(&mut self, name: impl Into<String>, position: Position) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = position,
            None => self.entries.push((name, position)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Position> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    pub fn body(&self, body: Body) -> Option<&Position> {
        self.get(body.name())
    }

    pub fn angle(&self, angle: CardinalAngle) -> Option<&Position> {
        self.get(angle.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Position)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose name is one of the ten bodies
    pub fn bodies(&self) -> ChartPositions {
        self.filtered(|name| name.parse::<Body>().is_ok())
    }

    /// Everything that is not a body (the chart angles)
    pub fn angles(&self) -> ChartPositions {
        self.filtered(|name| name.parse::<Body>().is_err())
    }

    fn filtered(&self, keep: impl Fn(&str) -> bool) -> ChartPositions {
        ChartPositions {
            entries: self
                .entries
                .iter()
                .filter(|(n, _)| keep(n))
                .cloned()
                .collect(),
        }
    }
}

impl Serialize for ChartPositions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, position) in &self.entries {
            map.serialize_entry(name, position)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_kept() {
        let positions = ChartPositions::from_longitudes([("C", 20.0), ("A", 10.0), ("B", 15.0)]);
        let names: Vec<&str> = positions.names().collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_replace_keeps_slot() {
        let mut positions = ChartPositions::from_longitudes([("A", 10.0), ("B", 15.0)]);
        positions.insert("A", Position::from_longitude(200.0));
        let names: Vec<&str> = positions.names().collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(positions.get("A").unwrap().sign, Sign::Libra);
    }

    #[test]
    fn test_split_bodies_and_angles() {
        let positions = ChartPositions::from_longitudes([
            ("Sun", 10.0),
            ("Ascendant", 100.0),
            ("Moon", 50.0),
            ("Imum Coeli", 300.0),
        ]);
        let bodies = positions.bodies();
        let angles = positions.angles();
        assert_eq!(bodies.names().collect::<Vec<_>>(), vec!["Sun", "Moon"]);
        assert_eq!(angles.names().collect::<Vec<_>>(), vec!["Ascendant", "Imum Coeli"]);
    }
}
