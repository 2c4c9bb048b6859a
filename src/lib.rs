// Library interface for tracker modules
// The binary and integration tests go through these exports

pub mod batch;
pub mod config;
pub mod day_steps;
pub mod duration;
pub mod error;
pub mod logging;
pub mod models;
pub mod record;
pub mod spent_calories;

// Re-export commonly used types for convenience
pub use models::*;
pub use day_steps::DayStepsCalculator;
pub use spent_calories::TrainingCalculator;
pub use batch::{ActivityReport, BatchReport};
pub use duration::parse_duration;
pub use error::{TrackerError, Result};
pub use logging::{LogConfig, LogLevel, LogFormat};
