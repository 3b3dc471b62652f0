use crate::aspects::types::{Aspect, AspectType, ASPECT_TABLE};
use crate::chart::data::ChartPositions;

pub const DEFAULT_ORB: f64 = 6.0;

/// Aspect calculator
#[derive(Debug, Clone, Copy)]
pub struct AspectCalculator {
    orb: f64,
}

impl AspectCalculator {
    /// Calculator with the default 6° orb
    pub fn new() -> Self {
        Self { orb: DEFAULT_ORB }
    }

    pub fn with_orb(orb: f64) -> Self {
        Self { orb }
    }

    pub fn orb(&self) -> f64 {
        self.orb
    }

    /// All aspects between every unordered pair of positions.
    ///
    /// Pairs are walked as (i, j) with i < j over the mapping order; for
    /// each pair every aspect within orb is reported, so a wide orb can
    /// yield more than one aspect per pair.
    pub fn compute_aspects(&self, positions: &ChartPositions) -> Vec<Aspect> {
        let entries: Vec<(&str, f64)> = positions
            .iter()
            .map(|(name, p)| (name, p.absolute_longitude))
            .collect();

        let mut aspects = Vec::new();
        for i in 0..entries.len() {
            for j in (i + 1)..entries.len() {
                let (name_a, lon_a) = entries[i];
                let (name_b, lon_b) = entries[j];

                for (aspect_type, separation, delta) in self.calculate_aspects(lon_a, lon_b) {
                    aspects.push(Aspect {
                        body_a: name_a.to_string(),
                        body_b: name_b.to_string(),
                        aspect_type,
                        measured_degrees: round2(separation),
                        orb_delta: round2(delta),
                    });
                }
            }
        }

        aspects
    }

    /// Aspects matched by two longitudes, with the raw separation and orb
    /// delta of each.
    pub fn calculate_aspects(&self, lon1: f64, lon2: f64) -> Vec<(AspectType, f64, f64)> {
        let separation = angular_separation(lon1, lon2);

        ASPECT_TABLE
            .iter()
            .filter_map(|aspect| {
                let delta = (separation - aspect.angle()).abs();
                (delta <= self.orb).then_some((*aspect, separation, delta))
            })
            .collect()
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal angular separation in [0, 180], never the reflex angle
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let raw_diff = (lon1 - lon2).abs();
    if raw_diff > 180.0 {
        360.0 - raw_diff
    } else {
        raw_diff
    }
}

/// Aspects among all positions within `orb` degrees.
pub fn detect_aspects(positions: &ChartPositions, orb: f64) -> Vec<Aspect> {
    AspectCalculator::with_orb(orb).compute_aspects(positions)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
