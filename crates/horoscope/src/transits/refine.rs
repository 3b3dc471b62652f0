//! Angular helpers and bisection refinement of a bracketed crossing.

use chrono::{Duration, NaiveDateTime};

use crate::western::zodiac::normalize_degrees;

/// Stop refining once the bracket is this short.
pub const DEFAULT_TOLERANCE_SECONDS: i64 = 30;
pub const DEFAULT_MAX_ITERATIONS: u32 = 30;

/// How far `a` is ahead of `b`, in (-180, +180].
///
/// Continuous near `a == b`; the branch cut sits where `a` is opposite `b`.
pub fn signed_delta(a: f64, b: f64) -> f64 {
    let delta = (a - b + 180.0).rem_euclid(360.0) - 180.0;
    if delta <= -180.0 {
        180.0
    } else {
        delta
    }
}

/// Mean of two longitudes along the shorter arc, in [0, 360).
pub fn circular_mean(a: f64, b: f64) -> f64 {
    normalize_degrees(b + signed_delta(a, b) / 2.0)
}

/// Signs differ strictly (zero has no sign).
pub fn opposite_signs(x: f64, y: f64) -> bool {
    (x > 0.0 && y < 0.0) || (x < 0.0 && y > 0.0)
}

/// A crossing between two consecutive samples: the current delta is exactly
/// zero, or it changed sign without jumping across the ±180 branch cut.
pub fn is_crossing(previous: f64, current: f64) -> bool {
    if current == 0.0 {
        return true;
    }
    opposite_signs(previous, current) && (previous - current).abs() <= 180.0
}

/// Three consecutive same-side samples whose middle one is less than half
/// as far from zero as either neighbour.
///
/// The delta turned back towards zero between the outer samples and may
/// have touched it twice within one step, which leaves no sign change to
/// bracket.
pub fn possible_double_crossing(before: f64, middle: f64, after: f64) -> bool {
    let same_side = (before > 0.0 && middle > 0.0 && after > 0.0)
        || (before < 0.0 && middle < 0.0 && after < 0.0);
    same_side && 2.0 * middle.abs() < before.abs().min(after.abs())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefineLimits {
    pub tolerance: Duration,
    pub max_iterations: u32,
}

impl Default for RefineLimits {
    fn default() -> Self {
        Self {
            tolerance: Duration::seconds(DEFAULT_TOLERANCE_SECONDS),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Bracket [start, end] whose deltas satisfy [`is_crossing`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub start_delta: f64,
    pub end_delta: f64,
}

pub fn midpoint(a: NaiveDateTime, b: NaiveDateTime) -> NaiveDateTime {
    a + b.signed_duration_since(a) / 2
}

/// Narrow a bracket down to the crossing instant.
///
/// The bracket must satisfy [`is_crossing`]; the kept half always has a
/// start delta of the opposite sign to its end (or an end at zero).
/// `delta_at` is the signed delta at a given instant. Returns the midpoint
/// of the final interval, or the first midpoint whose delta is exactly zero.
pub fn bisect_crossing<F, E>(
    bracket: Bracket,
    limits: RefineLimits,
    mut delta_at: F,
) -> Result<NaiveDateTime, E>
where
    F: FnMut(NaiveDateTime) -> Result<f64, E>,
{
    let Bracket { mut start, mut end, mut start_delta, .. } = bracket;

    for _ in 0..limits.max_iterations {
        if end.signed_duration_since(start) <= limits.tolerance {
            break;
        }

        let mid = midpoint(start, end);
        let mid_delta = delta_at(mid)?;
        if mid_delta == 0.0 {
            return Ok(mid);
        }

        if opposite_signs(start_delta, mid_delta) {
            end = mid;
        } else {
            start = mid;
            start_delta = mid_delta;
        }
    }

    Ok(midpoint(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::convert::Infallible;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|d| d.and_hms_opt(hour, minute, second))
            .unwrap()
    }

    #[test]
    fn test_signed_delta_range() {
        assert_eq!(signed_delta(10.0, 0.0), 10.0);
        assert_eq!(signed_delta(0.0, 10.0), -10.0);
        assert_eq!(signed_delta(5.0, 355.0), 10.0);
        assert_eq!(signed_delta(355.0, 5.0), -10.0);
        assert_eq!(signed_delta(180.0, 0.0), 180.0);
        assert_eq!(signed_delta(0.0, 180.0), 180.0);
        assert_eq!(signed_delta(42.0, 42.0), 0.0);
    }

    #[test]
    fn test_circular_mean_wraps() {
        assert!((circular_mean(359.0, 1.0) - 0.0).abs() < 1e-12);
        assert!((circular_mean(10.0, 20.0) - 15.0).abs() < 1e-12);
        assert!((circular_mean(350.0, 356.0) - 353.0).abs() < 1e-12);
    }

    #[test]
    fn test_is_crossing() {
        assert!(is_crossing(2.0, -1.0));
        assert!(is_crossing(-2.0, 1.0));
        assert!(is_crossing(3.0, 0.0));
        assert!(!is_crossing(0.0, 3.0));
        assert!(!is_crossing(2.0, 1.0));
        // wrap from +179 to -179 is the opposite point, not a crossing
        assert!(!is_crossing(179.0, -179.0));
    }

    #[test]
    fn test_possible_double_crossing() {
        assert!(possible_double_crossing(15.5, 0.5, 3.5));
        assert!(possible_double_crossing(-8.0, -1.0, -6.0));
        // monotonic approach
        assert!(!possible_double_crossing(9.0, 5.0, 1.0));
        // shallow dip far from zero
        assert!(!possible_double_crossing(105.5, 90.5, 93.5));
        // a real crossing is bracketed, not flagged
        assert!(!possible_double_crossing(3.0, 0.5, -2.0));
        // peak at the branch cut
        assert!(!possible_double_crossing(-170.0, -179.0, -175.0));
    }

    #[test]
    fn test_bisect_linear_crossing() {
        // delta falls linearly through zero at 00:07:20
        let zero = at(0, 7, 20);
        let delta = |t: NaiveDateTime| -> Result<f64, Infallible> {
            Ok(-(t.signed_duration_since(zero).num_milliseconds() as f64) / 1000.0)
        };
        let bracket = Bracket {
            start: at(0, 0, 0),
            end: at(0, 15, 0),
            start_delta: 440.0,
            end_delta: -460.0,
        };
        let found = bisect_crossing(bracket, RefineLimits::default(), delta).unwrap();
        assert!(found.signed_duration_since(zero).num_seconds().abs() <= 30);
    }

    #[test]
    fn test_bisect_respects_iteration_cap() {
        let mut calls = 0;
        let bracket = Bracket {
            start: at(0, 0, 0),
            end: at(12, 0, 0),
            start_delta: 1.0,
            end_delta: -1.0,
        };
        let limits = RefineLimits { tolerance: Duration::zero(), max_iterations: 5 };
        let result: Result<_, Infallible> = bisect_crossing(bracket, limits, |_| {
            calls += 1;
            Ok(1.0)
        });
        assert!(result.is_ok());
        assert_eq!(calls, 5);
    }

    #[test]
    fn test_bisect_propagates_errors() {
        let bracket = Bracket {
            start: at(0, 0, 0),
            end: at(1, 0, 0),
            start_delta: 1.0,
            end_delta: -1.0,
        };
        let result = bisect_crossing(bracket, RefineLimits::default(), |_| Err("boom"));
        assert_eq!(result, Err("boom"));
    }
}
