pub mod phase;

pub use phase::{
    month_moon_phases, moon_phase, moon_phase_on, MoonPhase, PhaseName, NEW_MOON_EPOCH,
    SYNODIC_MONTH,
};
