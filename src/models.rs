use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::TrackerError;

/// Record label for walking trainings
pub const WALKING_LABEL: &str = "Ходьба";
/// Record label for running trainings
pub const RUNNING_LABEL: &str = "Бег";

/// Kind of training, selecting the calorie formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainingType {
    Walking,
    Running,
}

impl TrainingType {
    /// Label used for this training type in records and reports
    pub fn label(&self) -> &'static str {
        match self {
            TrainingType::Walking => WALKING_LABEL,
            TrainingType::Running => RUNNING_LABEL,
        }
    }
}

impl FromStr for TrainingType {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            WALKING_LABEL => Ok(TrainingType::Walking),
            RUNNING_LABEL => Ok(TrainingType::Running),
            other => Err(TrackerError::UnknownTrainingType(other.to_string())),
        }
    }
}

impl fmt::Display for TrainingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Body measurements supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Biometrics {
    /// Body weight in kilograms
    pub weight_kg: f64,

    /// Body height in meters
    pub height_m: f64,
}

impl Biometrics {
    pub fn new(weight_kg: f64, height_m: f64) -> Self {
        Self {
            weight_kg,
            height_m,
        }
    }

    /// Both measurements are finite and strictly positive
    pub fn is_valid(&self) -> bool {
        self.weight_kg.is_finite()
            && self.height_m.is_finite()
            && self.weight_kg > 0.0
            && self.height_m > 0.0
    }
}

impl Default for Biometrics {
    fn default() -> Self {
        Self {
            weight_kg: 75.0,
            height_m: 1.75,
        }
    }
}

/// Parsed `steps,type,duration` record
///
/// The label is kept as written; it is turned into a [`TrainingType`] when
/// the formula is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingRecord {
    pub steps: u64,
    pub label: String,
    pub duration: Duration,
}

/// Parsed `steps,duration` record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRecord {
    pub steps: u64,
    pub duration: Duration,
}

/// Computed metrics of a single training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub training_type: TrainingType,

    /// Training duration, serialized as seconds
    #[serde(with = "duration_serde")]
    pub duration: Duration,

    /// Distance covered in kilometers
    pub distance_km: f64,

    /// Mean speed in km/h
    pub mean_speed_kmh: f64,

    /// Calories burned (kcal)
    pub calories: f64,
}

impl TrainingSummary {
    pub fn duration_hours(&self) -> f64 {
        self.duration.as_secs_f64() / 3600.0
    }
}

impl fmt::Display for TrainingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Тип тренировки: {}\nДлительность: {:.2} ч.\nДистанция: {:.2} км.\nСкорость: {:.2} км/ч\nСожгли калорий: {:.2}\n",
            self.training_type,
            self.duration_hours(),
            self.distance_km,
            self.mean_speed_kmh,
            self.calories
        )
    }
}

/// Computed metrics of a day of walking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub steps: u64,

    /// Distance covered in kilometers
    pub distance_km: f64,

    /// Calories burned (kcal)
    pub calories: f64,
}

impl fmt::Display for DaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Количество шагов: {}.\nДистанция составила {:.2} км.\nВы сожгли {:.2} ккал.\n",
            self.steps, self.distance_km, self.calories
        )
    }
}

// Helper module for serde duration serialization
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_type_labels() {
        assert_eq!("Ходьба".parse::<TrainingType>().unwrap(), TrainingType::Walking);
        assert_eq!("Бег".parse::<TrainingType>().unwrap(), TrainingType::Running);
        assert_eq!(TrainingType::Running.to_string(), "Бег");
    }

    #[test]
    fn test_training_type_is_case_sensitive() {
        assert!(matches!(
            "ходьба".parse::<TrainingType>(),
            Err(TrackerError::UnknownTrainingType(label)) if label == "ходьба"
        ));
        assert!("Swimming".parse::<TrainingType>().is_err());
        assert!("".parse::<TrainingType>().is_err());
    }

    #[test]
    fn test_biometrics_validation() {
        assert!(Biometrics::default().is_valid());
        assert!(!Biometrics::new(0.0, 1.8).is_valid());
        assert!(!Biometrics::new(80.0, -1.0).is_valid());
        assert!(!Biometrics::new(f64::NAN, 1.8).is_valid());
    }

    #[test]
    fn test_summary_serialization() {
        let summary = TrainingSummary {
            training_type: TrainingType::Walking,
            duration: Duration::from_secs(5400),
            distance_km: 3.5,
            mean_speed_kmh: 2.33,
            calories: 120.0,
        };

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"duration\":5400.0"));
        assert!(json.contains("\"Walking\""));

        let back: TrainingSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
        assert!((back.duration_hours() - 1.5).abs() < 1e-12);
    }
}
