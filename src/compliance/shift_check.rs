//! Shift-aware rest-period and weekly-hours validation.
//!
//! Validates a proposed shift against the daily ceiling, the rest-period
//! floor, and the weekly ceiling before it is persisted. All checks run
//! independently; one call can produce several warnings, and the result is
//! invalid as soon as any hard rule is breached.

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::config::SettingsStore;
use crate::error::{EngineError, EngineResult};
use crate::store::{ClockStore, ShiftStore};

/// How far back completed work is searched for the rest-period check.
const REST_LOOKBACK_DAYS: i64 = 7;
/// Width of the warning band above the rest floor and below the daily
/// ceiling, in minutes.
const NEAR_LIMIT_MINUTES: i64 = 60;
/// Width of the warning band below the weekly ceiling, in minutes.
const WEEKLY_NEAR_LIMIT_MINUTES: i64 = 240;

/// The rule a validation issue belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftRule {
    /// Shift duration against the daily maximum.
    DailyHours,
    /// Rest period since the previous work end.
    RestPeriod,
    /// Committed hours in the ISO week of the shift start.
    WeeklyHours,
}

/// One error or warning produced by shift validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRuleIssue {
    /// The rule that produced the issue.
    pub rule: ShiftRule,
    /// User-facing explanation.
    pub message: String,
}

/// The outcome of validating one proposed shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftValidation {
    /// False as soon as any hard rule is breached.
    pub valid: bool,
    /// Hard rule breaches; persisting the shift must be refused.
    pub errors: Vec<ShiftRuleIssue>,
    /// Near-limit advisories; the shift may still be persisted.
    pub warnings: Vec<ShiftRuleIssue>,
}

/// Validates proposed shifts against rest-period and hour ceilings.
///
/// Reads both the shift schedule and the time-entry history: the rest
/// period is measured from the most recent *actual or scheduled* work end,
/// and the weekly total combines scheduled shift durations with worked
/// minutes.
pub struct ShiftValidator {
    clock: Arc<dyn ClockStore>,
    shifts: Arc<dyn ShiftStore>,
    settings: Arc<dyn SettingsStore>,
}

impl ShiftValidator {
    /// Creates a validator over the given collaborators.
    pub fn new(
        clock: Arc<dyn ClockStore>,
        shifts: Arc<dyn ShiftStore>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            clock,
            shifts,
            settings,
        }
    }

    /// Validates a proposed shift `[start, end)` for an employee.
    ///
    /// Malformed input (end not after start, unknown employee) is a
    /// blocking error; rule breaches come back as data in the result.
    pub fn validate(
        &self,
        tenant: &str,
        employee_id: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> EngineResult<ShiftValidation> {
        if end <= start {
            return Err(EngineError::InvalidInput {
                field: "end_time".to_string(),
                message: "shift end must be after its start".to_string(),
            });
        }
        if !self.clock.employee_exists(employee_id)? {
            return Err(EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            });
        }

        let settings = self.settings.get(tenant)?;
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        // Daily ceiling.
        let duration = (end - start).num_minutes();
        let max_daily = settings.max_daily_minutes();
        if duration > max_daily {
            errors.push(ShiftRuleIssue {
                rule: ShiftRule::DailyHours,
                message: format!(
                    "shift of {} minutes exceeds the daily maximum of {} minutes",
                    duration, max_daily
                ),
            });
        } else if duration > max_daily - NEAR_LIMIT_MINUTES {
            warnings.push(ShiftRuleIssue {
                rule: ShiftRule::DailyHours,
                message: format!(
                    "shift of {} minutes is within one hour of the daily maximum",
                    duration
                ),
            });
        }

        // Rest period since the last work end before the proposed start.
        if let Some(last_end) = self.last_work_end_before(employee_id, start)? {
            let rest = (start - last_end).num_minutes();
            let min_rest = settings.min_rest_minutes();
            if rest < min_rest {
                errors.push(ShiftRuleIssue {
                    rule: ShiftRule::RestPeriod,
                    message: format!(
                        "only {} minutes of rest since the last shift end, {} required",
                        rest, min_rest
                    ),
                });
            } else if rest < min_rest + NEAR_LIMIT_MINUTES {
                warnings.push(ShiftRuleIssue {
                    rule: ShiftRule::RestPeriod,
                    message: format!(
                        "{} minutes of rest is within one hour of the {} minute floor",
                        rest, min_rest
                    ),
                });
            }
        }

        // Weekly ceiling over the ISO week (Monday start) of the start.
        let committed = self.committed_week_minutes(employee_id, start)?;
        let projected = committed + duration;
        let max_weekly = settings.max_weekly_minutes();
        if projected > max_weekly {
            errors.push(ShiftRuleIssue {
                rule: ShiftRule::WeeklyHours,
                message: format!(
                    "adding this shift commits {} weekly minutes, above the maximum of {}",
                    projected, max_weekly
                ),
            });
        } else if projected > max_weekly - WEEKLY_NEAR_LIMIT_MINUTES {
            warnings.push(ShiftRuleIssue {
                rule: ShiftRule::WeeklyHours,
                message: format!(
                    "adding this shift commits {} weekly minutes, within four hours of the maximum",
                    projected
                ),
            });
        }

        Ok(ShiftValidation {
            valid: errors.is_empty(),
            errors,
            warnings,
        })
    }

    /// The most recent work end strictly before `start`, searched across
    /// completed entries and scheduled shifts in the lookback window.
    fn last_work_end_before(
        &self,
        employee_id: &str,
        start: NaiveDateTime,
    ) -> EngineResult<Option<NaiveDateTime>> {
        let from = (start - Duration::days(REST_LOOKBACK_DAYS)).date();
        let to = start.date();

        let entry_end = self
            .clock
            .list_entries(employee_id, from, to)?
            .into_iter()
            .filter_map(|e| e.clock_out)
            .filter(|out| *out < start)
            .max();

        let shift_end = self
            .shifts
            .list_shifts(employee_id, from, to)?
            .into_iter()
            .map(|s| s.resolved_end())
            .filter(|end| *end < start)
            .max();

        Ok(entry_end.max(shift_end))
    }

    /// Scheduled plus worked minutes in the ISO week containing `start`.
    fn committed_week_minutes(
        &self,
        employee_id: &str,
        start: NaiveDateTime,
    ) -> EngineResult<i64> {
        let monday =
            start.date() - Duration::days(i64::from(start.date().weekday().num_days_from_monday()));
        let sunday = monday + Duration::days(6);

        let scheduled: i64 = self
            .shifts
            .list_shifts(employee_id, monday, sunday)?
            .iter()
            .map(|s| s.duration_minutes())
            .sum();
        let worked: i64 = self
            .clock
            .list_entries(employee_id, monday, sunday)?
            .iter()
            .map(|e| e.total_work_minutes)
            .sum();

        Ok(scheduled + worked)
    }
}
