//! Duration literal parsing
//!
//! Records carry their duration as a compound literal such as `1h45m` or
//! `0h50m00s`: an optional sign followed by one or more `<number><unit>`
//! tokens. Numbers may have a fractional part (`1.5h`). The bare literal `0`
//! is the only token allowed without a unit.

use crate::error::{Result, TrackerError};
use std::time::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const NANOS_PER_MINUTE: u128 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MINUTE;

/// Largest duration accepted, matching a signed 64-bit nanosecond count
const MAX_NANOS: u128 = i64::MAX as u128;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(NANOS_PER_MICRO),
        "ms" => Some(NANOS_PER_MILLI),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(NANOS_PER_MINUTE),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Signed span in nanoseconds, as written in the literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SignedNanos {
    negative: bool,
    nanos: u128,
}

fn parse_signed(literal: &str) -> std::result::Result<SignedNanos, String> {
    let invalid = || format!("invalid duration literal \"{}\"", literal);

    let (negative, mut rest) = match literal.as_bytes().first() {
        Some(b'-') => (true, &literal[1..]),
        Some(b'+') => (false, &literal[1..]),
        _ => (false, literal),
    };

    if rest == "0" {
        return Ok(SignedNanos { negative, nanos: 0 });
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_digits, after_int) = rest.split_at(int_len);

        let (frac_digits, after_number) = match after_int.strip_prefix('.') {
            Some(tail) => {
                let frac_len = tail.bytes().take_while(u8::is_ascii_digit).count();
                tail.split_at(frac_len)
            }
            None => ("", after_int),
        };
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(invalid());
        }

        let unit_len = after_number
            .char_indices()
            .find(|(_, c)| *c == '.' || c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(after_number.len());
        let (unit, tail) = after_number.split_at(unit_len);
        if unit.is_empty() {
            return Err(format!("missing unit in duration \"{}\"", literal));
        }
        let scale = unit_nanos(unit)
            .ok_or_else(|| format!("unknown unit \"{}\" in duration \"{}\"", unit, literal))?;

        let whole: u128 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| invalid())?
        };
        let mut value = whole.checked_mul(scale).ok_or_else(invalid)?;

        // Fractional digits beyond nanosecond resolution are dropped
        let mut place = scale;
        for digit in frac_digits.bytes() {
            place /= 10;
            if place == 0 {
                break;
            }
            value += u128::from(digit - b'0') * place;
        }

        total = total.checked_add(value).ok_or_else(invalid)?;
        if total > MAX_NANOS {
            return Err(invalid());
        }
        rest = tail;
    }

    Ok(SignedNanos {
        negative,
        nanos: total,
    })
}

/// Parse a duration literal that must describe a strictly positive span
///
/// Unparsable literals and spans that are zero or negative both fail with
/// [`TrackerError::InvalidDuration`].
pub fn parse_duration(literal: &str) -> Result<Duration> {
    let parsed = parse_signed(literal).map_err(TrackerError::InvalidDuration)?;

    if parsed.negative || parsed.nanos == 0 {
        return Err(TrackerError::InvalidDuration(format!(
            "duration must be greater than 0, got \"{}\"",
            literal
        )));
    }

    let secs = (parsed.nanos / NANOS_PER_SECOND) as u64;
    let subsec = (parsed.nanos % NANOS_PER_SECOND) as u32;
    Ok(Duration::new(secs, subsec))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_literals() {
        assert_eq!(parse_duration("1h45m").unwrap(), Duration::from_secs(6300));
        assert_eq!(parse_duration("0h50m00s").unwrap(), Duration::from_secs(3000));
        assert_eq!(parse_duration("3h00m00s").unwrap(), Duration::from_secs(10800));
        assert_eq!(parse_duration("+90s").unwrap(), Duration::from_secs(90));
    }

    #[test]
    fn test_fractional_and_small_units() {
        assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5400));
        assert_eq!(parse_duration(".5m").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("3us").unwrap(), Duration::from_micros(3));
        assert_eq!(parse_duration("3µs").unwrap(), Duration::from_micros(3));
        assert_eq!(parse_duration("7ns").unwrap(), Duration::from_nanos(7));
    }

    #[test]
    fn test_non_positive_rejected() {
        for literal in ["0", "0h0m0s", "-0", "-1h", "0s"] {
            assert!(
                matches!(parse_duration(literal), Err(TrackerError::InvalidDuration(_))),
                "{} should be rejected",
                literal
            );
        }
    }

    #[test]
    fn test_unparsable_rejected() {
        for literal in ["", "1", "h", "1x", "1h 30m", " 1h", "1.h2", ".h", "-", "1d"] {
            assert!(
                matches!(parse_duration(literal), Err(TrackerError::InvalidDuration(_))),
                "{} should be rejected",
                literal
            );
        }
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(parse_duration("99999999999999999999h").is_err());
        assert!(parse_duration("3000000h").is_err());
    }
}
