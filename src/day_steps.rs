//! Day-steps calculator
//!
//! Summarises a `steps,duration` package from the tracker. Distance uses a
//! fixed step length rather than the height-derived one of the training
//! calculator; calories come from the walking formula.

use crate::duration::parse_duration;
use crate::error::Result;
use crate::models::{Biometrics, DayRecord, DaySummary};
use crate::record::{parse_steps, split_fields};
use crate::spent_calories::{TrainingCalculator, M_IN_KM};
use tracing::{debug, error};

/// Average step length in meters
pub const STEP_LENGTH: f64 = 0.65;

const DAY_FIELDS: usize = 2;

/// Calculator for `steps,duration` day packages
pub struct DayStepsCalculator;

impl DayStepsCalculator {
    /// Parse a day package
    pub fn parse_package(raw: &str) -> Result<DayRecord> {
        let fields = split_fields(raw, DAY_FIELDS)?;

        let steps = parse_steps(fields[0])?;
        let duration = parse_duration(fields[1])?;

        Ok(DayRecord { steps, duration })
    }

    /// Distance in kilometers for `steps` of the fixed step length
    pub fn distance(steps: u64) -> f64 {
        steps as f64 * STEP_LENGTH / M_IN_KM
    }

    /// Parse a package and compute its distance and calories
    pub fn day_summary(raw: &str, biometrics: &Biometrics) -> Result<DaySummary> {
        let record = Self::parse_package(raw)?;

        let calories = TrainingCalculator::walking_spent_calories(
            record.steps,
            biometrics.weight_kg,
            biometrics.height_m,
            record.duration,
        )?;

        let summary = DaySummary {
            steps: record.steps,
            distance_km: Self::distance(record.steps),
            calories,
        };
        debug!(?summary, "day computed");

        Ok(summary)
    }

    /// Build the day report for a package
    ///
    /// Any failure is logged and yields an empty string, so an invalid
    /// package cannot be told apart from empty output without the logs. Use
    /// [`DayStepsCalculator::day_summary`] to get the error itself.
    pub fn day_action_info(raw: &str, weight: f64, height: f64) -> String {
        match Self::day_summary(raw, &Biometrics::new(weight, height)) {
            Ok(summary) => summary.to_string(),
            Err(e) => {
                error!(record = raw, error = %e, "day package rejected");
                String::new()
            }
        }
    }
}
