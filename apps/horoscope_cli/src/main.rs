mod report;
mod validate;

use anyhow::Context;
use chrono::NaiveTime;
use clap::{Args, Parser, Subcommand, ValueEnum};
use horoscope::aspects::AspectCalculator;
use horoscope::chart::{BirthData, PositionResolver};
use horoscope::ephemeris::{EphemerisProvider, GeoLocation, MeanMotionEphemeris, SwissEphemerisAdapter};
use horoscope::moon::{month_moon_phases, moon_phase};
use horoscope::transits::TransitScanner;
use horoscope_config::{EphemerisBackend, HoroscopeSettings};
use serde::Serialize;
use std::path::PathBuf;

use report::{
    AspectsReport, BirthEcho, DateEcho, HoroscopeReport, LocationEcho, MoonMonthReport,
    MoonPhaseReport, MoonRequestEcho, TimeEcho, TransitParameters, TransitsReport,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Backend {
    /// Swiss Ephemeris data files.
    Swiss,
    /// Built-in mean-motion model (low precision, no files).
    Mean,
}

impl From<Backend> for EphemerisBackend {
    fn from(b: Backend) -> Self {
        match b {
            Backend::Swiss => EphemerisBackend::Swiss,
            Backend::Mean => EphemerisBackend::Mean,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Config file (default: configs/horoscope.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Ephemeris backend override.
    #[arg(long, value_enum, global = true)]
    backend: Option<Backend>,

    /// Swiss Ephemeris data directory override.
    #[arg(long, global = true)]
    ephemeris_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
struct BirthArgs {
    #[arg(long)]
    year: i32,
    #[arg(long)]
    month: u32,
    #[arg(long)]
    day: u32,
    #[arg(long, default_value_t = 0)]
    hour: u32,
    #[arg(long, default_value_t = 0)]
    minute: u32,
    #[arg(long, default_value_t = 0)]
    second: u32,
    #[arg(long, allow_negative_numbers = true)]
    latitude: f64,
    #[arg(long, allow_negative_numbers = true)]
    longitude: f64,
    /// Hours east of UTC.
    #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
    tz: f64,
}

impl BirthArgs {
    fn validated(&self) -> anyhow::Result<BirthData> {
        validate::check_date(self.year, self.month, self.day)?;
        validate::check_time(self.hour, self.minute, self.second)?;
        validate::check_location(self.latitude, self.longitude, self.tz)?;
        Ok(BirthData {
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour,
            minute: self.minute,
            second: self.second,
            latitude: self.latitude,
            longitude: self.longitude,
            timezone_offset_hours: self.tz,
        })
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign, decan and degree of the ten bodies and four angles.
    Positions(BirthArgs),
    /// Major aspects between every pair of chart points.
    Aspects {
        #[command(flatten)]
        birth: BirthArgs,
        /// Orb in degrees (default from config, else 6).
        #[arg(long)]
        orb: Option<f64>,
    },
    /// Instants a body crosses the four cardinal angles during a month.
    Transits {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,
        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,
        #[arg(long, allow_negative_numbers = true, default_value_t = 0.0)]
        tz: f64,
        /// Body name (default from config, else Moon).
        #[arg(long)]
        planet: Option<String>,
        /// Sampling step in minutes, 1-60 (default from config, else 15).
        #[arg(long)]
        step_minutes: Option<u32>,
    },
    /// Lunar phase at a UTC instant.
    Moon {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        day: u32,
        #[arg(long, default_value_t = 0)]
        hour: u32,
        #[arg(long, default_value_t = 0)]
        minute: u32,
        #[arg(long, default_value_t = 0)]
        second: u32,
    },
    /// Lunar phase for every day of a month.
    MoonMonth {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// UTC time of day to sample, HH:MM:SS (default from config, else 12:00:00).
        #[arg(long)]
        time: Option<String>,
    },
}

fn open_provider(settings: &HoroscopeSettings) -> anyhow::Result<Box<dyn EphemerisProvider>> {
    match settings.backend {
        EphemerisBackend::Swiss => {
            let adapter = SwissEphemerisAdapter::new(settings.ephemeris_path.clone())
                .context("Failed to open Swiss Ephemeris (try --backend mean)")?;
            log::info!("using Swiss Ephemeris data in {}", adapter.ephemeris_path().display());
            Ok(Box::new(adapter))
        }
        EphemerisBackend::Mean => {
            log::info!("using mean-motion ephemeris; positions are approximate");
            Ok(Box::new(MeanMotionEphemeris::new()))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut settings = horoscope_config::load_settings(cli.config.as_deref())?;
    if let Some(backend) = cli.backend {
        settings.backend = backend.into();
    }
    if cli.ephemeris_path.is_some() {
        settings.ephemeris_path = cli.ephemeris_path.clone();
    }
    log::debug!("settings: {:?}", settings);

    match cli.command {
        Command::Positions(args) => {
            let birth = args.validated()?;
            let provider = open_provider(&settings)?;
            let positions = PositionResolver::new(provider)
                .resolve(&birth)
                .context("Failed to calculate positions")?;
            print_json(&HoroscopeReport::new(&positions, BirthEcho::from(&birth)))
        }
        Command::Aspects { birth, orb } => {
            let birth = birth.validated()?;
            let orb = orb.unwrap_or(settings.orb);
            validate::check_orb(orb)?;
            let provider = open_provider(&settings)?;
            let positions = PositionResolver::new(provider)
                .resolve(&birth)
                .context("Failed to calculate positions")?;
            let aspects = AspectCalculator::with_orb(orb).compute_aspects(&positions);
            print_json(&AspectsReport::new(aspects, orb, BirthEcho::from(&birth)))
        }
        Command::Transits { year, month, latitude, longitude, tz, planet, step_minutes } => {
            validate::check_transit_year(year)?;
            validate::check_date(year, month, 1)?;
            validate::check_location(latitude, longitude, tz)?;
            let body = match planet {
                Some(name) => validate::check_body(&name)?,
                None => settings.transit_body,
            };
            let step_minutes = step_minutes.unwrap_or(settings.step_minutes);
            validate::check_step_minutes(step_minutes)?;

            let provider = open_provider(&settings)?;
            let transits = TransitScanner::new(provider)
                .with_step_minutes(step_minutes)
                .scan(year, month, GeoLocation::new(latitude, longitude), tz, body.name())
                .context("Failed to scan transits")?;

            let parameters = TransitParameters {
                year,
                month,
                location: LocationEcho { latitude, longitude, timezone_offset_hours: tz },
                planet: body,
                step_minutes,
            };
            print_json(&TransitsReport::new(&transits, parameters))
        }
        Command::Moon { year, month, day, hour, minute, second } => {
            validate::check_date(year, month, day)?;
            validate::check_time(hour, minute, second)?;
            print_json(&MoonPhaseReport {
                success: true,
                moon_phase: moon_phase(year, month, day, hour, minute, second),
                request_data: MoonRequestEcho {
                    date: DateEcho { year, month, day },
                    time: TimeEcho { hour, minute, second },
                },
            })
        }
        Command::MoonMonth { year, month, time } => {
            validate::check_date(year, month, 1)?;
            let time_of_day = match time {
                Some(text) => NaiveTime::parse_from_str(&text, "%H:%M:%S")
                    .with_context(|| format!("--time {:?} is not HH:MM:SS", text))?,
                None => settings.moon_time_of_day,
            };
            let phases = month_moon_phases(year, month, time_of_day);
            print_json(&MoonMonthReport::new(year, month, time_of_day, phases))
        }
    }
}
