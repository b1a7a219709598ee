//! Compact duration strings such as `90s`, `1h30m` or `2w`.
//!
//! Supported units are `s`, `m`, `h`, `d` (24h) and `w` (7d). Components may
//! be chained and are summed; a bare `0` is accepted as zero.

use std::time::Duration;

use crate::error::{ConfigError, Result};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;

/// Parses a compact duration string.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidDuration`] for empty input, a missing or
/// unknown unit, or an overflowing value.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use taskwatch_config::duration::parse_duration;
///
/// assert_eq!(parse_duration("0s").unwrap(), Duration::ZERO);
/// assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
/// assert_eq!(parse_duration("168h").unwrap(), parse_duration("1w").unwrap());
/// assert!(parse_duration("3 parsecs").is_err());
/// ```
pub fn parse_duration(value: &str) -> Result<Duration> {
    let invalid = |reason: &str| ConfigError::InvalidDuration {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty duration"));
    }
    if trimmed == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total: u64 = 0;
    let mut rest = trimmed;
    while !rest.is_empty() {
        let digits = rest.chars().take_while(char::is_ascii_digit).count();
        if digits == 0 {
            return Err(invalid("expected a number"));
        }
        let (number, tail) = rest.split_at(digits);
        let amount: u64 = number.parse().map_err(|_| invalid("number too large"))?;

        let unit_len = tail.chars().take_while(char::is_ascii_alphabetic).count();
        let (unit, tail) = tail.split_at(unit_len);
        let scale = match unit {
            "s" => 1,
            "m" => MINUTE,
            "h" => HOUR,
            "d" => DAY,
            "w" => WEEK,
            "" => return Err(invalid("missing unit")),
            _ => return Err(invalid("unknown unit")),
        };

        total = amount
            .checked_mul(scale)
            .and_then(|secs| total.checked_add(secs))
            .ok_or_else(|| invalid("duration too large"))?;
        rest = tail;
    }

    Ok(Duration::from_secs(total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_each_unit() {
        assert_eq!(parse_duration("45s").unwrap(), Duration::from_secs(45));
        assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("24h").unwrap(), Duration::from_secs(86_400));
        assert_eq!(parse_duration("3d").unwrap(), Duration::from_secs(259_200));
        assert_eq!(parse_duration("2w").unwrap(), Duration::from_secs(1_209_600));
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "h", "10", "10y", "1h-5m", "-1h"] {
            assert!(parse_duration(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn rejects_overflow() {
        assert!(parse_duration("99999999999999999999w").is_err());
        assert!(parse_duration("30000000000000000w").is_err());
    }

    proptest! {
        /// Chained components sum up.
        #[test]
        fn components_sum(h in 0u64..1000, m in 0u64..1000, s in 0u64..1000) {
            let parsed = parse_duration(&format!("{h}h{m}m{s}s")).unwrap();
            prop_assert_eq!(parsed, Duration::from_secs(h * 3600 + m * 60 + s));
        }
    }
}
