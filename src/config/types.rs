//! Compliance settings types and statutory bounds.
//!
//! The settings model the configurable ArbZG limits for one tenant. The
//! statutory values are hard lower/upper bounds enforced on every update,
//! not mere defaults: a tenant may tighten the rules but never relax them
//! below what the law requires.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Statutory ArbZG bounds. Settings updates are validated against these.
pub mod statutory {
    use rust_decimal::Decimal;

    /// Minimum break for work over six hours, ArbZG §4.
    pub const MIN_BREAK_6H_MINUTES: i64 = 30;
    /// Minimum break for work over nine hours, ArbZG §4.
    pub const MIN_BREAK_9H_MINUTES: i64 = 45;
    /// Minimum length of a single counted break segment, ArbZG §4.
    pub const MIN_BREAK_SEGMENT_MINUTES: i64 = 15;
    /// Maximum daily working hours, ArbZG §3.
    pub const MAX_DAILY_HOURS: Decimal = Decimal::from_parts(10, 0, 0, false, 0);
    /// Maximum weekly working hours, ArbZG §3.
    pub const MAX_WEEKLY_HOURS: Decimal = Decimal::from_parts(48, 0, 0, false, 0);
    /// Minimum rest between shifts a tenant may configure, ArbZG §5.
    pub const MIN_REST_HOURS: Decimal = Decimal::from_parts(10, 0, 0, false, 0);
}

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Configurable labor-law limits for one tenant.
///
/// All minute-valued fields are whole minutes; hour-valued ceilings use
/// [`Decimal`] so fractional contract hours (for example a 38.5 hour week)
/// stay exact.
///
/// # Example
///
/// ```
/// use timeclock_engine::config::ComplianceSettings;
///
/// let settings = ComplianceSettings::default();
/// assert_eq!(settings.min_break_6h_minutes, 30);
/// assert_eq!(settings.max_daily_minutes(), 600);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplianceSettings {
    /// Minimum break minutes once net work exceeds six hours.
    pub min_break_6h_minutes: i64,
    /// Minimum break minutes once net work exceeds nine hours.
    pub min_break_9h_minutes: i64,
    /// Minimum length of a single break segment to count at all.
    pub min_break_segment_minutes: i64,
    /// Maximum net daily working hours.
    pub max_daily_hours: Decimal,
    /// Maximum weekly working hours (scheduled plus worked).
    pub max_weekly_hours: Decimal,
    /// Minimum rest period between two shifts.
    pub min_rest_between_shifts_hours: Decimal,
    /// Minutes of breakless work after which a no-break alert fires.
    pub alert_no_break_after_minutes: i64,
    /// Open-break minutes after which a break-too-long alert fires.
    pub alert_break_too_long_minutes: i64,
    /// Remaining-daily-minute window for the approaching-max-hours alert.
    pub alert_approaching_max_hours_minutes: i64,
}

impl Default for ComplianceSettings {
    fn default() -> Self {
        Self {
            min_break_6h_minutes: statutory::MIN_BREAK_6H_MINUTES,
            min_break_9h_minutes: statutory::MIN_BREAK_9H_MINUTES,
            min_break_segment_minutes: statutory::MIN_BREAK_SEGMENT_MINUTES,
            max_daily_hours: statutory::MAX_DAILY_HOURS,
            max_weekly_hours: statutory::MAX_WEEKLY_HOURS,
            // ArbZG §5 default; tenants may go down to the 10h floor.
            min_rest_between_shifts_hours: Decimal::from_parts(11, 0, 0, false, 0),
            alert_no_break_after_minutes: 360,
            alert_break_too_long_minutes: 90,
            alert_approaching_max_hours_minutes: 30,
        }
    }
}

impl ComplianceSettings {
    /// Validates the settings against the statutory ArbZG bounds.
    ///
    /// Returns `InvalidInput` naming the first offending field. Updates that
    /// would relax a limit below (or above, for ceilings) the statutory
    /// value are rejected.
    pub fn validate(&self) -> EngineResult<()> {
        if self.min_break_6h_minutes < statutory::MIN_BREAK_6H_MINUTES {
            return Err(EngineError::InvalidInput {
                field: "min_break_6h_minutes".to_string(),
                message: format!(
                    "must be at least {} minutes (ArbZG §4)",
                    statutory::MIN_BREAK_6H_MINUTES
                ),
            });
        }
        if self.min_break_9h_minutes < statutory::MIN_BREAK_9H_MINUTES {
            return Err(EngineError::InvalidInput {
                field: "min_break_9h_minutes".to_string(),
                message: format!(
                    "must be at least {} minutes (ArbZG §4)",
                    statutory::MIN_BREAK_9H_MINUTES
                ),
            });
        }
        if self.min_break_9h_minutes < self.min_break_6h_minutes {
            return Err(EngineError::InvalidInput {
                field: "min_break_9h_minutes".to_string(),
                message: "must not be below the six-hour tier".to_string(),
            });
        }
        if self.min_break_segment_minutes < statutory::MIN_BREAK_SEGMENT_MINUTES {
            return Err(EngineError::InvalidInput {
                field: "min_break_segment_minutes".to_string(),
                message: format!(
                    "must be at least {} minutes (ArbZG §4)",
                    statutory::MIN_BREAK_SEGMENT_MINUTES
                ),
            });
        }
        if self.max_daily_hours <= Decimal::ZERO || self.max_daily_hours > statutory::MAX_DAILY_HOURS
        {
            return Err(EngineError::InvalidInput {
                field: "max_daily_hours".to_string(),
                message: format!(
                    "must be positive and at most {} hours (ArbZG §3)",
                    statutory::MAX_DAILY_HOURS
                ),
            });
        }
        if self.max_weekly_hours <= Decimal::ZERO
            || self.max_weekly_hours > statutory::MAX_WEEKLY_HOURS
        {
            return Err(EngineError::InvalidInput {
                field: "max_weekly_hours".to_string(),
                message: format!(
                    "must be positive and at most {} hours (ArbZG §3)",
                    statutory::MAX_WEEKLY_HOURS
                ),
            });
        }
        if self.min_rest_between_shifts_hours < statutory::MIN_REST_HOURS {
            return Err(EngineError::InvalidInput {
                field: "min_rest_between_shifts_hours".to_string(),
                message: format!(
                    "must be at least {} hours (ArbZG §5)",
                    statutory::MIN_REST_HOURS
                ),
            });
        }
        if self.alert_no_break_after_minutes <= 0
            || self.alert_break_too_long_minutes <= 0
            || self.alert_approaching_max_hours_minutes <= 0
        {
            return Err(EngineError::InvalidInput {
                field: "alert_thresholds".to_string(),
                message: "alert thresholds must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// The daily ceiling in whole minutes.
    pub fn max_daily_minutes(&self) -> i64 {
        (self.max_daily_hours * MINUTES_PER_HOUR)
            .trunc()
            .to_i64()
            .unwrap_or(i64::MAX)
    }

    /// The weekly ceiling in whole minutes.
    pub fn max_weekly_minutes(&self) -> i64 {
        (self.max_weekly_hours * MINUTES_PER_HOUR)
            .trunc()
            .to_i64()
            .unwrap_or(i64::MAX)
    }

    /// The rest floor in whole minutes.
    pub fn min_rest_minutes(&self) -> i64 {
        (self.min_rest_between_shifts_hours * MINUTES_PER_HOUR)
            .trunc()
            .to_i64()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// CS-001: defaults are the statutory values
    #[test]
    fn test_defaults_match_statute() {
        let settings = ComplianceSettings::default();
        assert_eq!(settings.min_break_6h_minutes, 30);
        assert_eq!(settings.min_break_9h_minutes, 45);
        assert_eq!(settings.min_break_segment_minutes, 15);
        assert_eq!(settings.max_daily_hours, dec("10"));
        assert_eq!(settings.max_weekly_hours, dec("48"));
        assert_eq!(settings.min_rest_between_shifts_hours, dec("11"));
        assert!(settings.validate().is_ok());
    }

    /// CS-002: relaxing the 6h break floor is rejected
    #[test]
    fn test_break_floor_rejected() {
        let settings = ComplianceSettings {
            min_break_6h_minutes: 20,
            ..ComplianceSettings::default()
        };
        let err = settings.validate().unwrap_err();
        match err {
            EngineError::InvalidInput { field, .. } => {
                assert_eq!(field, "min_break_6h_minutes");
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    /// CS-003: raising the daily ceiling past 10h is rejected
    #[test]
    fn test_daily_ceiling_rejected() {
        let settings = ComplianceSettings {
            max_daily_hours: dec("12"),
            ..ComplianceSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    /// CS-004: rest below 10h is rejected, 10h itself is allowed
    #[test]
    fn test_rest_floor() {
        let ok = ComplianceSettings {
            min_rest_between_shifts_hours: dec("10"),
            ..ComplianceSettings::default()
        };
        assert!(ok.validate().is_ok());

        let bad = ComplianceSettings {
            min_rest_between_shifts_hours: dec("9.5"),
            ..ComplianceSettings::default()
        };
        assert!(bad.validate().is_err());
    }

    /// CS-005: tightening within bounds is allowed
    #[test]
    fn test_tightened_settings_allowed() {
        let settings = ComplianceSettings {
            min_break_6h_minutes: 40,
            min_break_9h_minutes: 60,
            max_daily_hours: dec("8.5"),
            max_weekly_hours: dec("38.5"),
            ..ComplianceSettings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_nine_hour_tier_below_six_hour_tier_rejected() {
        let settings = ComplianceSettings {
            min_break_6h_minutes: 50,
            min_break_9h_minutes: 45,
            ..ComplianceSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_minute_conversions() {
        let settings = ComplianceSettings {
            max_daily_hours: dec("8.5"),
            max_weekly_hours: dec("38.5"),
            min_rest_between_shifts_hours: dec("11"),
            ..ComplianceSettings::default()
        };
        assert_eq!(settings.max_daily_minutes(), 510);
        assert_eq!(settings.max_weekly_minutes(), 2310);
        assert_eq!(settings.min_rest_minutes(), 660);
    }

    #[test]
    fn test_non_positive_alert_threshold_rejected() {
        let settings = ComplianceSettings {
            alert_break_too_long_minutes: 0,
            ..ComplianceSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_falls_back_to_defaults() {
        let yaml = "max_weekly_hours: \"40\"\nmin_break_6h_minutes: 35\n";
        let settings: ComplianceSettings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.max_weekly_hours, dec("40"));
        assert_eq!(settings.min_break_6h_minutes, 35);
        // Untouched fields keep the statutory defaults.
        assert_eq!(settings.min_break_9h_minutes, 45);
        assert_eq!(settings.min_rest_between_shifts_hours, dec("11"));
    }
}
