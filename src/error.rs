//! Unified error hierarchy for tracker
//!
//! Every validation failure of the record parsers and calorie formulas has its
//! own variant so callers can match on the kind instead of a message.

use thiserror::Error;

/// Top-level error type for all tracker operations
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Record does not have the expected number of comma-separated fields
    #[error("Malformed record: expected {expected} fields, got {actual}")]
    MalformedRecord { expected: usize, actual: usize },

    /// Step count is not an integer or is not positive
    #[error("Invalid step count: {0}")]
    InvalidSteps(String),

    /// Duration literal is unparsable or not positive
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    /// Training label matches neither walking nor running
    #[error("Unknown training type: {0}")]
    UnknownTrainingType(String),

    /// Calorie formula called with a non-positive argument
    #[error(
        "Invalid arguments: steps={steps}, weight={weight}, height={height}, duration={duration_secs}s"
    )]
    InvalidArguments {
        steps: u64,
        weight: f64,
        height: f64,
        duration_secs: f64,
    },

    /// Batch line that is not valid UTF-8
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

impl TrackerError {
    /// Whether the error comes from the content of a record rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TrackerError::MalformedRecord { .. }
                | TrackerError::InvalidSteps(_)
                | TrackerError::InvalidDuration(_)
                | TrackerError::UnknownTrainingType(_)
                | TrackerError::InvalidEncoding(_)
        )
    }

    /// Emit the error as a tracing event, `warn` for bad input and `error` otherwise
    pub fn log(&self, operation: &str) {
        if self.is_input_error() {
            tracing::warn!(operation, error = %self, "operation failed");
        } else {
            tracing::error!(operation, error = %self, "operation failed");
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            TrackerError::MalformedRecord { expected, .. } => format!(
                "Record must contain {} comma-separated fields, e.g. {}",
                expected,
                if *expected == 2 {
                    "\"678,0h50m00s\""
                } else {
                    "\"3456,Ходьба,3h00m00s\""
                }
            ),
            TrackerError::UnknownTrainingType(label) => format!(
                "Training type \"{}\" is not supported. Use \"Ходьба\" or \"Бег\".",
                label
            ),
            TrackerError::InvalidArguments { .. } => {
                "Weight and height must be positive. Please check your biometrics.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors() {
        assert!(TrackerError::UnknownTrainingType("Плавание".to_string()).is_input_error());
        assert!(TrackerError::InvalidEncoding("line 2".to_string()).is_input_error());
        assert!(!TrackerError::Configuration("bad".to_string()).is_input_error());
        assert!(!TrackerError::InvalidArguments {
            steps: 0,
            weight: 75.0,
            height: 1.75,
            duration_secs: 60.0,
        }
        .is_input_error());
    }

    #[test]
    fn test_user_messages() {
        let err = TrackerError::MalformedRecord {
            expected: 3,
            actual: 4,
        };
        assert!(err.user_message().contains("3 comma-separated fields"));

        let err = TrackerError::UnknownTrainingType("Swimming".to_string());
        assert!(err.user_message().contains("Swimming"));
    }
}
