//! JSON payloads printed by each subcommand.

use chrono::{Duration, NaiveDate, NaiveTime};
use horoscope::aspects::Aspect;
use horoscope::chart::{moon_direction, moon_lenormand_card, ChartPositions, MoonDirection, Position};
use horoscope::ephemeris::{Body, CardinalAngle};
use horoscope::moon::MoonPhase;
use horoscope::transits::Transit;
use horoscope::western::Sign;
use serde::Serialize;

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Same names and order, degrees rounded to 2 decimals.
fn rounded(positions: &ChartPositions) -> ChartPositions {
    let mut out = ChartPositions::with_capacity(positions.len());
    for (name, p) in positions.iter() {
        out.insert(
            name,
            Position {
                degree_in_sign: round_to(p.degree_in_sign, 2),
                absolute_longitude: round_to(p.absolute_longitude, 2),
                ..*p
            },
        );
    }
    out
}

#[derive(Debug, Serialize)]
pub struct DateEcho {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Serialize)]
pub struct TimeEcho {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

#[derive(Debug, Serialize)]
pub struct LocationEcho {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone_offset_hours: f64,
}

#[derive(Debug, Serialize)]
pub struct BirthEcho {
    pub date: DateEcho,
    pub time: TimeEcho,
    pub location: LocationEcho,
}

impl From<&horoscope::chart::BirthData> for BirthEcho {
    fn from(b: &horoscope::chart::BirthData) -> Self {
        Self {
            date: DateEcho { year: b.year, month: b.month, day: b.day },
            time: TimeEcho { hour: b.hour, minute: b.minute, second: b.second },
            location: LocationEcho {
                latitude: b.latitude,
                longitude: b.longitude,
                timezone_offset_hours: b.timezone_offset_hours,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MoonSummary {
    pub direction: MoonDirection,
    pub description: &'static str,
    pub lenormand_card: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct Horoscope {
    pub planets: ChartPositions,
    pub houses: ChartPositions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moon: Option<MoonSummary>,
}

#[derive(Debug, Serialize)]
pub struct HoroscopeReport {
    pub success: bool,
    pub horoscope: Horoscope,
    pub birth_data: BirthEcho,
}

impl HoroscopeReport {
    pub fn new(positions: &ChartPositions, birth: BirthEcho) -> Self {
        let moon = moon_direction(positions).map(|direction| MoonSummary {
            direction,
            description: direction.description(),
            lenormand_card: moon_lenormand_card(positions),
        });
        let rounded = rounded(positions);

        Self {
            success: true,
            horoscope: Horoscope { planets: rounded.bodies(), houses: rounded.angles(), moon },
            birth_data: birth,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AspectOut {
    pub planet1: String,
    pub planet2: String,
    pub aspect: String,
    pub degrees: f64,
    pub orb: f64,
}

impl From<Aspect> for AspectOut {
    fn from(a: Aspect) -> Self {
        Self {
            planet1: a.body_a,
            planet2: a.body_b,
            aspect: a.aspect_type.to_string(),
            degrees: a.measured_degrees,
            orb: a.orb_delta,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AspectsReport {
    pub success: bool,
    pub aspects: Vec<AspectOut>,
    pub aspect_count: usize,
    pub orb_used: f64,
    pub birth_data: BirthEcho,
}

impl AspectsReport {
    pub fn new(aspects: Vec<Aspect>, orb: f64, birth: BirthEcho) -> Self {
        let aspects: Vec<AspectOut> = aspects.into_iter().map(AspectOut::from).collect();
        Self {
            success: true,
            aspect_count: aspects.len(),
            aspects,
            orb_used: orb,
            birth_data: birth,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransitOut {
    pub planet: Body,
    pub angle: CardinalAngle,
    pub datetime_local: String,
    pub longitude: f64,
    pub sign: Sign,
    pub degree_in_sign: f64,
    pub decan: u8,
}

impl From<&Transit> for TransitOut {
    fn from(t: &Transit) -> Self {
        Self {
            planet: t.body,
            angle: t.angle,
            datetime_local: t.local_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
            longitude: round_to(t.longitude, 6),
            sign: t.sign,
            degree_in_sign: round_to(t.degree_in_sign, 2),
            decan: t.decan,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TransitParameters {
    pub year: i32,
    pub month: u32,
    pub location: LocationEcho,
    pub planet: Body,
    pub step_minutes: u32,
}

#[derive(Debug, Serialize)]
pub struct TransitsReport {
    pub success: bool,
    pub transits: Vec<TransitOut>,
    pub parameters: TransitParameters,
    pub total_transits: usize,
}

impl TransitsReport {
    pub fn new(transits: &[Transit], parameters: TransitParameters) -> Self {
        Self {
            success: true,
            transits: transits.iter().map(TransitOut::from).collect(),
            parameters,
            total_transits: transits.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MoonPhaseReport {
    pub success: bool,
    pub moon_phase: MoonPhase,
    pub request_data: MoonRequestEcho,
}

#[derive(Debug, Serialize)]
pub struct MoonRequestEcho {
    pub date: DateEcho,
    pub time: TimeEcho,
}

#[derive(Debug, Serialize)]
pub struct DailyPhase {
    pub date: String,
    #[serde(flatten)]
    pub phase: MoonPhase,
}

#[derive(Debug, Serialize)]
pub struct MoonMonthReport {
    pub success: bool,
    pub year: i32,
    pub month: u32,
    pub time_of_day: String,
    pub phases: Vec<DailyPhase>,
    pub total_days: usize,
}

impl MoonMonthReport {
    /// `phases` holds one entry per day starting on the 1st.
    pub fn new(year: i32, month: u32, time_of_day: NaiveTime, phases: Vec<MoonPhase>) -> Self {
        let first = NaiveDate::from_ymd_opt(year, month, 1);
        let phases: Vec<DailyPhase> = phases
            .into_iter()
            .enumerate()
            .map(|(i, phase)| DailyPhase {
                date: first
                    .map(|d| (d + Duration::days(i as i64)).format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
                phase,
            })
            .collect();

        Self {
            success: true,
            year,
            month,
            time_of_day: time_of_day.format("%H:%M:%S").to_string(),
            total_days: phases.len(),
            phases,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horoscope::chart::BirthData;
    use horoscope::moon::month_moon_phases;

    fn birth() -> BirthData {
        BirthData {
            year: 1990,
            month: 5,
            day: 15,
            hour: 14,
            minute: 30,
            second: 0,
            latitude: 41.9028,
            longitude: 12.4964,
            timezone_offset_hours: 2.0,
        }
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(121.23456, 2), 121.23);
        assert_eq!(round_to(103.123456789, 6), 103.123457);
        assert_eq!(round_to(-0.005, 2), -0.01);
    }

    #[test]
    fn test_horoscope_split_and_rounding() {
        let positions = ChartPositions::from_longitudes([
            ("Sun", 54.123456),
            ("Moon", 200.0),
            ("Ascendant", 100.987),
            ("Descendant", 280.987),
        ]);
        let report = HoroscopeReport::new(&positions, BirthEcho::from(&birth()));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["horoscope"]["planets"]["Sun"]["absolute_longitude"], 54.12);
        assert_eq!(json["horoscope"]["planets"]["Sun"]["degree_in_sign"], 24.12);
        assert_eq!(json["horoscope"]["planets"]["Sun"]["sign"], "Taurus");
        assert!(json["horoscope"]["planets"].get("Ascendant").is_none());
        assert_eq!(json["horoscope"]["houses"]["Ascendant"]["absolute_longitude"], 100.99);
        assert_eq!(json["horoscope"]["moon"]["direction"], "ascending");
        assert_eq!(json["birth_data"]["location"]["timezone_offset_hours"], 2.0);
    }

    #[test]
    fn test_aspect_field_names() {
        let positions = ChartPositions::from_longitudes([("Sun", 100.0), ("Moon", 278.0)]);
        let aspects = horoscope::detect_aspects(&positions, 6.0);
        let report = AspectsReport::new(aspects, 6.0, BirthEcho::from(&birth()));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["aspect_count"], 1);
        assert_eq!(json["orb_used"], 6.0);
        assert_eq!(json["aspects"][0]["planet1"], "Sun");
        assert_eq!(json["aspects"][0]["planet2"], "Moon");
        assert_eq!(json["aspects"][0]["aspect"], "Opposition");
        assert_eq!(json["aspects"][0]["degrees"], 178.0);
        assert_eq!(json["aspects"][0]["orb"], 2.0);
    }

    #[test]
    fn test_transit_rounding() {
        let local_time = NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|d| d.and_hms_milli_opt(0, 52, 3, 750))
            .unwrap();
        let transit = Transit {
            body: Body::Moon,
            angle: CardinalAngle::ImumCoeli,
            local_time,
            longitude: 103.000_000_4,
            sign: Sign::Cancer,
            degree_in_sign: 13.004,
            decan: 2,
        };
        let json = serde_json::to_value(TransitOut::from(&transit)).unwrap();

        assert_eq!(json["planet"], "Moon");
        assert_eq!(json["angle"], "Imum Coeli");
        assert_eq!(json["datetime_local"], "2025-01-01T00:52:03");
        assert_eq!(json["longitude"], 103.0);
        assert_eq!(json["degree_in_sign"], 13.0);
    }

    #[test]
    fn test_month_report_dates() {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        let report = MoonMonthReport::new(2024, 2, noon, month_moon_phases(2024, 2, noon));
        assert_eq!(report.total_days, 29);
        assert_eq!(report.phases[0].date, "2024-02-01");
        assert_eq!(report.phases[28].date, "2024-02-29");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["time_of_day"], "12:00:00");
        assert!(json["phases"][0]["phase_name"].is_string());
    }
}
