pub mod calculator;
pub mod types;

pub use calculator::{angular_separation, detect_aspects, AspectCalculator, DEFAULT_ORB};
pub use types::{Aspect, AspectType, ASPECT_TABLE};
