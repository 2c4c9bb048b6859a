//! Batch processing of mixed tracker records
//!
//! A batch holds one record per line. Two-field lines are day packages and
//! three-field lines are trainings; blank lines and `#` comments are skipped.
//! A bad line does not stop the batch.

use crate::day_steps::DayStepsCalculator;
use crate::error::{Result, TrackerError};
use crate::models::{Biometrics, DaySummary, TrainingSummary};
use crate::record::field_count;
use crate::spent_calories::TrainingCalculator;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

/// Result of a single record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ActivityReport {
    Day(DaySummary),
    Training(TrainingSummary),
}

impl fmt::Display for ActivityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityReport::Day(summary) => fmt::Display::fmt(summary, f),
            ActivityReport::Training(summary) => fmt::Display::fmt(summary, f),
        }
    }
}

/// Route a record to the calculator matching its field count
pub fn process_record(raw: &str, biometrics: &Biometrics) -> Result<ActivityReport> {
    if field_count(raw) <= 2 {
        DayStepsCalculator::day_summary(raw, biometrics).map(ActivityReport::Day)
    } else {
        TrainingCalculator::training_summary(raw, biometrics).map(ActivityReport::Training)
    }
}

/// Outcome of one line of a batch
#[derive(Debug)]
pub struct LineOutcome {
    /// 1-based line number in the input
    pub line_number: usize,
    pub record: String,
    pub result: Result<ActivityReport>,
}

/// Outcomes of a whole batch, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<LineOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// Total calories over the successful records
    pub fn total_calories(&self) -> f64 {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .map(|report| match report {
                ActivityReport::Day(summary) => summary.calories,
                ActivityReport::Training(summary) => summary.calories,
            })
            .sum()
    }
}

/// Process every record read from `reader`
///
/// Only read failures abort the batch; record failures, including lines that
/// are not valid UTF-8, are kept in the report.
pub fn process_reader<R: BufRead>(reader: R, biometrics: &Biometrics) -> Result<BatchReport> {
    let mut report = BatchReport::default();

    for (index, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        let line_number = index + 1;

        let (record, result) = match std::str::from_utf8(&line) {
            Ok(text) => {
                let record = text.trim_end_matches('\r');
                if record.trim().is_empty() || record.starts_with('#') {
                    continue;
                }
                (record.to_string(), process_record(record, biometrics))
            }
            Err(e) => (
                String::from_utf8_lossy(&line).trim_end_matches('\r').to_string(),
                Err(TrackerError::InvalidEncoding(format!(
                    "line {} is not valid UTF-8: {}",
                    line_number, e
                ))),
            ),
        };

        if let Err(e) = &result {
            warn!(line = line_number, record = %record, error = %e, "record rejected");
        }

        report.outcomes.push(LineOutcome {
            line_number,
            record,
            result,
        });
    }

    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "batch processed"
    );
    Ok(report)
}

/// Process a batch file
pub fn process_file<P: AsRef<Path>>(path: P, biometrics: &Biometrics) -> Result<BatchReport> {
    let file = File::open(path)?;
    process_reader(BufReader::new(file), biometrics)
}
