//! Training calculator
//!
//! Turns a `steps,type,duration` record into distance, mean speed and the
//! calories spent, using a height-derived step length. Walking and running
//! share the same energy formula; walking is weighted by a fixed coefficient.

use crate::duration::parse_duration;
use crate::error::{Result, TrackerError};
use crate::models::{Biometrics, TrainingRecord, TrainingSummary, TrainingType};
use crate::record::{parse_steps, split_fields};
use std::time::Duration;
use tracing::debug;

/// Step length as a fraction of body height
pub const STEP_LENGTH_COEFFICIENT: f64 = 0.45;
/// Meters in one kilometer
pub const M_IN_KM: f64 = 1000.0;
/// Minutes in one hour
pub const MIN_IN_H: f64 = 60.0;
/// Share of the running energy spent while walking
pub const WALKING_CALORIES_COEFFICIENT: f64 = 0.5;

const TRAINING_FIELDS: usize = 3;

/// Calculator for `steps,type,duration` training records
pub struct TrainingCalculator;

impl TrainingCalculator {
    /// Parse a training record
    ///
    /// The label field is returned as written; an unknown label is only
    /// detected when the formula is chosen.
    pub fn parse_training(raw: &str) -> Result<TrainingRecord> {
        let fields = split_fields(raw, TRAINING_FIELDS)?;

        let steps = parse_steps(fields[0])?;
        let duration = parse_duration(fields[2])?;

        Ok(TrainingRecord {
            steps,
            label: fields[1].to_string(),
            duration,
        })
    }

    /// Distance in kilometers covered by `steps` of a person `height` meters tall
    pub fn distance(steps: u64, height: f64) -> f64 {
        let step_length = height * STEP_LENGTH_COEFFICIENT;
        steps as f64 * step_length / M_IN_KM
    }

    /// Mean speed in km/h, or 0 for an empty duration
    pub fn mean_speed(steps: u64, height: f64, duration: Duration) -> f64 {
        if duration.is_zero() {
            return 0.0;
        }
        Self::distance(steps, height) / hours(duration)
    }

    /// Calories spent running
    pub fn running_spent_calories(
        steps: u64,
        weight: f64,
        height: f64,
        duration: Duration,
    ) -> Result<f64> {
        check_arguments(steps, weight, height, duration)?;
        let mean_speed = Self::mean_speed(steps, height, duration);
        Ok(weight * mean_speed * minutes(duration) / MIN_IN_H)
    }

    /// Calories spent walking
    pub fn walking_spent_calories(
        steps: u64,
        weight: f64,
        height: f64,
        duration: Duration,
    ) -> Result<f64> {
        check_arguments(steps, weight, height, duration)?;
        let mean_speed = Self::mean_speed(steps, height, duration);
        Ok(weight * mean_speed * minutes(duration) / MIN_IN_H * WALKING_CALORIES_COEFFICIENT)
    }

    /// Calories for the given training type
    pub fn spent_calories(
        training_type: TrainingType,
        steps: u64,
        weight: f64,
        height: f64,
        duration: Duration,
    ) -> Result<f64> {
        match training_type {
            TrainingType::Walking => Self::walking_spent_calories(steps, weight, height, duration),
            TrainingType::Running => Self::running_spent_calories(steps, weight, height, duration),
        }
    }

    /// Parse a record and compute every metric of the training
    pub fn training_summary(raw: &str, biometrics: &Biometrics) -> Result<TrainingSummary> {
        let record = Self::parse_training(raw)?;
        let training_type: TrainingType = record.label.parse()?;

        let calories = Self::spent_calories(
            training_type,
            record.steps,
            biometrics.weight_kg,
            biometrics.height_m,
            record.duration,
        )?;

        let summary = TrainingSummary {
            training_type,
            duration: record.duration,
            distance_km: Self::distance(record.steps, biometrics.height_m),
            mean_speed_kmh: Self::mean_speed(record.steps, biometrics.height_m, record.duration),
            calories,
        };
        debug!(?summary, "training computed");

        Ok(summary)
    }

    /// Build the training report for a record
    ///
    /// Failures are logged and returned to the caller.
    pub fn training_info(raw: &str, weight: f64, height: f64) -> Result<String> {
        Self::training_summary(raw, &Biometrics::new(weight, height))
            .map(|summary| summary.to_string())
            .inspect_err(|e| e.log("training_info"))
    }
}

fn check_arguments(steps: u64, weight: f64, height: f64, duration: Duration) -> Result<()> {
    let valid = steps > 0 && weight > 0.0 && height > 0.0 && !duration.is_zero();
    if !valid {
        return Err(TrackerError::InvalidArguments {
            steps,
            weight,
            height,
            duration_secs: duration.as_secs_f64(),
        });
    }
    Ok(())
}

fn hours(duration: Duration) -> f64 {
    duration.as_secs_f64() / 3600.0
}

fn minutes(duration: Duration) -> f64 {
    duration.as_secs_f64() / 60.0
}
