pub mod chart;
pub mod config;
pub mod error;
pub mod group;
pub mod plot;
pub mod record;
pub mod series;
pub mod stats;

/// Default number of population standard deviations a measurement may sit
/// away from its group mean before it is dropped as an outlier.
pub const DEVIATION_COUNT_TO_FILTER: f64 = 4.0;
