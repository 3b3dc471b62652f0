use chrono::{Duration, NaiveDateTime};

use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{Body, CardinalAngle, GeoLocation, CARDINAL_ANGLES};
use crate::time::{local_to_julian_day, month_bounds};
use crate::transits::refine::{
    bisect_crossing, circular_mean, is_crossing, possible_double_crossing, signed_delta, Bracket,
    RefineLimits,
};
use crate::transits::types::{Transit, TransitError};
use crate::western::zodiac::decompose_longitude;

pub const DEFAULT_STEP_MINUTES: u32 = 15;

/// Finds the instants within a month at which a body sits exactly on one
/// of the four cardinal angles.
///
/// The month is sampled at a fixed step; every sign change of the body's
/// signed distance to an angle marks a bracket that is then bisected.
/// Two crossings closer together than one step cancel out and leave no
/// sign change; when the samples show the delta dipping towards zero and
/// back, a warning names the interval, and a smaller step resolves it.
pub struct TransitScanner<P> {
    provider: P,
    step_minutes: u32,
    limits: RefineLimits,
}

impl<P: EphemerisProvider> TransitScanner<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            step_minutes: DEFAULT_STEP_MINUTES,
            limits: RefineLimits::default(),
        }
    }

    pub fn with_step_minutes(mut self, step_minutes: u32) -> Self {
        self.step_minutes = step_minutes;
        self
    }

    pub fn with_refine_limits(mut self, limits: RefineLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Crossings of `body` over the cardinal angles during the local month
    /// `year`-`month`, sorted by local time.
    pub fn scan(
        &self,
        year: i32,
        month: u32,
        location: GeoLocation,
        tz_offset_hours: f64,
        body: &str,
    ) -> Result<Vec<Transit>, TransitError> {
        let body: Body = body
            .parse()
            .map_err(|_| TransitError::UnsupportedBody(body.to_string()))?;
        if self.step_minutes == 0 {
            return Err(TransitError::InvalidStep(self.step_minutes));
        }
        let (start, end) =
            month_bounds(year, month).ok_or(TransitError::InvalidMonth { year, month })?;

        let sky = SkySampler { provider: &self.provider, body, location, tz_offset_hours };
        let brackets = self.find_brackets(&sky, start, end)?;

        let mut transits = Vec::with_capacity(brackets.len());
        for (angle, bracket) in brackets {
            let local_time =
                bisect_crossing(bracket, self.limits, |t| sky.delta(t, angle))?;
            if local_time < start || local_time >= end {
                log::debug!("{} crossing of {} at {} falls outside the month", body, angle, local_time);
                continue;
            }
            transits.push(sky.transit_at(local_time, angle)?);
        }

        transits.sort_by_key(|t| t.local_time);
        log::debug!(
            "{} {}-{:02}: {} transits over cardinal angles",
            body,
            year,
            month,
            transits.len()
        );
        Ok(transits)
    }

    /// Walk [start, end] at the configured step and collect every sample
    /// interval in which some angle was crossed.
    fn find_brackets(
        &self,
        sky: &SkySampler<'_, P>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<(CardinalAngle, Bracket)>, EphemerisError> {
        let step = Duration::minutes(self.step_minutes as i64);
        let mut brackets = Vec::new();

        let mut before: Option<(NaiveDateTime, [f64; 4])> = None;
        let mut prev_time = start;
        let mut prev_deltas = sky.deltas(start)?;
        let mut current = start + step;
        let mut samples = 1usize;

        while current <= end {
            let deltas = sky.deltas(current)?;
            samples += 1;

            for (i, angle) in CARDINAL_ANGLES.iter().enumerate() {
                if is_crossing(prev_deltas[i], deltas[i]) {
                    brackets.push((
                        *angle,
                        Bracket {
                            start: prev_time,
                            end: current,
                            start_delta: prev_deltas[i],
                            end_delta: deltas[i],
                        },
                    ));
                } else if let Some((before_time, before_deltas)) = before {
                    if possible_double_crossing(before_deltas[i], prev_deltas[i], deltas[i]) {
                        log::warn!(
                            "{} may cross {} twice between {} and {} (closest {:.4}° at {}); \
                             no transit recorded, use a smaller step than {} min",
                            sky.body,
                            angle,
                            before_time,
                            current,
                            prev_deltas[i],
                            prev_time,
                            self.step_minutes
                        );
                    }
                }
            }

            before = Some((prev_time, prev_deltas));
            prev_time = current;
            prev_deltas = deltas;
            current += step;
        }

        log::debug!(
            "{}: {} samples at {} min, {} brackets",
            sky.body,
            samples,
            self.step_minutes,
            brackets.len()
        );
        Ok(brackets)
    }
}

/// Body and angle longitudes at local instants for one scan.
struct SkySampler<'a, P> {
    provider: &'a P,
    body: Body,
    location: GeoLocation,
    tz_offset_hours: f64,
}

impl<P: EphemerisProvider> SkySampler<'_, P> {
    fn longitudes(&self, local: NaiveDateTime) -> Result<(f64, [f64; 4]), EphemerisError> {
        let jd = local_to_julian_day(local, self.tz_offset_hours);
        let body_lon = self.provider.longitude(jd, self.body)?;
        let angles = self.provider.chart_angles(jd, self.location)?;
        Ok((body_lon, CARDINAL_ANGLES.map(|a| angles.get(a))))
    }

    fn deltas(&self, local: NaiveDateTime) -> Result<[f64; 4], EphemerisError> {
        let (body_lon, angle_lons) = self.longitudes(local)?;
        Ok(angle_lons.map(|angle_lon| signed_delta(body_lon, angle_lon)))
    }

    fn delta(&self, local: NaiveDateTime, angle: CardinalAngle) -> Result<f64, EphemerisError> {
        Ok(self.deltas(local)?[angle_slot(angle)])
    }

    fn transit_at(&self, local: NaiveDateTime, angle: CardinalAngle) -> Result<Transit, EphemerisError> {
        let (body_lon, angle_lons) = self.longitudes(local)?;
        let placement = decompose_longitude(circular_mean(body_lon, angle_lons[angle_slot(angle)]));
        log::trace!("{} on {} at {} ({:.4}°)", self.body, angle, local, placement.longitude);

        Ok(Transit {
            body: self.body,
            angle,
            local_time: local,
            longitude: placement.longitude,
            sign: placement.sign,
            degree_in_sign: placement.degree_in_sign,
            decan: placement.decan,
        })
    }
}

fn angle_slot(angle: CardinalAngle) -> usize {
    match angle {
        CardinalAngle::Ascendant => 0,
        CardinalAngle::Descendant => 1,
        CardinalAngle::Midheaven => 2,
        CardinalAngle::ImumCoeli => 3,
    }
}

/// Crossings of `body` over the four cardinal angles in a local month.
pub fn scan_transits<P: EphemerisProvider>(
    provider: P,
    year: i32,
    month: u32,
    location: GeoLocation,
    tz_offset_hours: f64,
    body: &str,
    step_minutes: u32,
) -> Result<Vec<Transit>, TransitError> {
    TransitScanner::new(provider)
        .with_step_minutes(step_minutes)
        .scan(year, month, location, tz_offset_hours, body)
}
