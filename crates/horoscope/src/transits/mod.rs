pub mod refine;
pub mod scanner;
pub mod types;

pub use refine::{circular_mean, signed_delta, RefineLimits};
pub use scanner::{scan_transits, TransitScanner, DEFAULT_STEP_MINUTES};
pub use types::{Transit, TransitError};
