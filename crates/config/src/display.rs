//! Display settings for the terminal board.
//!
//! Controls how often the board redraws on its own and which colors card
//! durations take as tasks age.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::duration::parse_duration;
use crate::error::{ConfigError, Result};

/// Default redraw interval in seconds.
pub const DEFAULT_TICK_SECS: u64 = 30;

/// Minimum allowed redraw interval in seconds.
pub const MIN_TICK_SECS: u64 = 1;

/// Maximum allowed redraw interval in seconds.
pub const MAX_TICK_SECS: u64 = 3600;

/// Maps an age to a 256-color palette index.
///
/// # Examples
///
/// ```
/// use taskwatch_config::AgeThreshold;
///
/// let threshold = AgeThreshold::new("24h", 226);
/// assert_eq!(threshold.after(), "24h");
/// assert_eq!(threshold.color, 226);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeThreshold {
    /// Compact duration, see [`parse_duration`].
    pub after: String,
    /// Terminal palette index.
    pub color: u8,
}

impl AgeThreshold {
    #[must_use]
    pub fn new(after: impl Into<String>, color: u8) -> Self {
        Self {
            after: after.into(),
            color,
        }
    }

    #[must_use]
    pub fn after(&self) -> &str {
        &self.after
    }
}

/// Parsed threshold, ready for lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedThreshold {
    pub after: Duration,
    pub color: u8,
}

fn default_age_thresholds() -> Vec<AgeThreshold> {
    vec![
        AgeThreshold::new("0s", 242),
        AgeThreshold::new("1h", 34),
        AgeThreshold::new("24h", 226),
        AgeThreshold::new("72h", 208),
        AgeThreshold::new("168h", 196),
    ]
}

fn default_tick_secs() -> u64 {
    DEFAULT_TICK_SECS
}

/// Terminal board display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Age colors, in any order.
    #[serde(default = "default_age_thresholds")]
    pub age_thresholds: Vec<AgeThreshold>,

    /// Seconds between forced redraws.
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            age_thresholds: default_age_thresholds(),
            tick_secs: DEFAULT_TICK_SECS,
        }
    }
}

impl DisplayConfig {
    /// Returns the thresholds parsed and sorted by duration, shortest first.
    ///
    /// Falls back to the defaults when none are configured.
    ///
    /// # Errors
    ///
    /// Returns an error if any threshold duration fails to parse.
    pub fn parsed_thresholds(&self) -> Result<Vec<ParsedThreshold>> {
        let source = if self.age_thresholds.is_empty() {
            default_age_thresholds()
        } else {
            self.age_thresholds.clone()
        };

        let mut parsed = source
            .iter()
            .map(|t| {
                Ok(ParsedThreshold {
                    after: parse_duration(&t.after)?,
                    color: t.color,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        parsed.sort_by_key(|t| t.after);
        Ok(parsed)
    }

    /// Returns the redraw interval.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_secs)
    }

    /// Validates the display settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a threshold does not parse or the tick interval
    /// is out of range.
    pub fn validate(&self) -> Result<()> {
        self.parsed_thresholds()?;

        if self.tick_secs < MIN_TICK_SECS {
            return Err(ConfigError::InvalidTickInterval {
                reason: format!(
                    "interval {} is below minimum of {} seconds",
                    self.tick_secs, MIN_TICK_SECS
                ),
            });
        }

        if self.tick_secs > MAX_TICK_SECS {
            return Err(ConfigError::InvalidTickInterval {
                reason: format!(
                    "interval {} exceeds maximum of {} seconds",
                    self.tick_secs, MAX_TICK_SECS
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_are_sorted() {
        let parsed = DisplayConfig::default().parsed_thresholds().unwrap();
        let colors: Vec<u8> = parsed.iter().map(|t| t.color).collect();
        assert_eq!(colors, vec![242, 34, 226, 208, 196]);
        assert!(parsed.windows(2).all(|w| w[0].after <= w[1].after));
    }

    #[test]
    fn unsorted_thresholds_are_sorted_on_parse() {
        let config = DisplayConfig {
            age_thresholds: vec![AgeThreshold::new("2d", 1), AgeThreshold::new("1h", 2)],
            ..Default::default()
        };
        let parsed = config.parsed_thresholds().unwrap();
        assert_eq!(parsed[0].color, 2);
        assert_eq!(parsed[1].color, 1);
    }

    #[test]
    fn empty_thresholds_fall_back_to_defaults() {
        let config = DisplayConfig {
            age_thresholds: Vec::new(),
            ..Default::default()
        };
        assert_eq!(config.parsed_thresholds().unwrap().len(), 5);
    }

    #[test]
    fn validate_rejects_bad_threshold() {
        let config = DisplayConfig {
            age_thresholds: vec![AgeThreshold::new("soon", 1)],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn validate_tick_range() {
        let too_fast = DisplayConfig {
            tick_secs: 0,
            ..Default::default()
        };
        assert!(too_fast.validate().is_err());

        let too_slow = DisplayConfig {
            tick_secs: MAX_TICK_SECS + 1,
            ..Default::default()
        };
        assert!(too_slow.validate().is_err());

        assert!(DisplayConfig::default().validate().is_ok());
    }

    #[test]
    fn deserialize_partial() {
        let config: DisplayConfig = serde_json::from_str(r#"{"tick_secs": 5}"#).unwrap();
        assert_eq!(config.tick_secs, 5);
        assert_eq!(config.age_thresholds.len(), 5);
    }
}
