//! Field splitting and validation shared by both record parsers

use crate::error::{Result, TrackerError};

/// Split a record on `,` and require exactly `expected` fields
pub(crate) fn split_fields(raw: &str, expected: usize) -> Result<Vec<&str>> {
    let fields: Vec<&str> = raw.split(',').collect();
    if fields.len() != expected {
        return Err(TrackerError::MalformedRecord {
            expected,
            actual: fields.len(),
        });
    }
    Ok(fields)
}

/// Parse the step count field, which must be a strictly positive integer
pub(crate) fn parse_steps(field: &str) -> Result<u64> {
    let steps: i64 = field
        .parse()
        .map_err(|e| TrackerError::InvalidSteps(format!("\"{}\": {}", field, e)))?;

    if steps <= 0 {
        return Err(TrackerError::InvalidSteps(format!(
            "step count must be greater than 0, got {}",
            steps
        )));
    }
    Ok(steps as u64)
}

/// Number of comma-separated fields in a record
pub fn field_count(raw: &str) -> usize {
    raw.split(',').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_fields() {
        assert_eq!(split_fields("1,2", 2).unwrap(), vec!["1", "2"]);
        assert!(matches!(
            split_fields("1,2,3", 2),
            Err(TrackerError::MalformedRecord { expected: 2, actual: 3 })
        ));
        assert!(matches!(
            split_fields("", 3),
            Err(TrackerError::MalformedRecord { expected: 3, actual: 1 })
        ));
    }

    #[test]
    fn test_parse_steps() {
        assert_eq!(parse_steps("678").unwrap(), 678);
        assert_eq!(parse_steps("+12").unwrap(), 12);
        for field in ["0", "-5", "abc", "", " 12", "1.5"] {
            assert!(
                matches!(parse_steps(field), Err(TrackerError::InvalidSteps(_))),
                "{} should be rejected",
                field
            );
        }
    }

    #[test]
    fn test_field_count() {
        assert_eq!(field_count("678,0h50m00s"), 2);
        assert_eq!(field_count("3456,Бег,1h"), 3);
        assert_eq!(field_count(""), 1);
    }
}
