//! Pure compliance rule evaluation.
//!
//! Every function here is a pure computation over minute counts and
//! settings: no I/O, no side effects, safe to call concurrently and
//! repeatedly. The same inputs always produce the same violations and
//! warnings, which is what lets the state machine re-run checks freely.
//!
//! The break tiers follow ArbZG §4: no break required up to six hours of
//! net work, the six-hour tier up to nine hours, the nine-hour tier above.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ComplianceSettings;
use crate::models::{ComplianceViolation, ViolationStatus, ViolationType};

/// Net work minutes above which the six-hour break tier applies.
pub const SIX_HOUR_TIER_MINUTES: i64 = 360;
/// Net work minutes above which the nine-hour break tier applies.
pub const NINE_HOUR_TIER_MINUTES: i64 = 540;

/// Returns the break minutes required for the given net work minutes.
///
/// "Net work minutes" is elapsed clocked-in time minus break time taken.
///
/// # Examples
///
/// ```
/// use timeclock_engine::compliance::required_break_minutes;
/// use timeclock_engine::config::ComplianceSettings;
///
/// let settings = ComplianceSettings::default();
/// assert_eq!(required_break_minutes(360, &settings), 0);
/// assert_eq!(required_break_minutes(361, &settings), 30);
/// assert_eq!(required_break_minutes(540, &settings), 30);
/// assert_eq!(required_break_minutes(541, &settings), 45);
/// ```
pub fn required_break_minutes(net_work_minutes: i64, settings: &ComplianceSettings) -> i64 {
    if net_work_minutes > NINE_HOUR_TIER_MINUTES {
        settings.min_break_9h_minutes
    } else if net_work_minutes > SIX_HOUR_TIER_MINUTES {
        settings.min_break_6h_minutes
    } else {
        0
    }
}

/// The outcome of a break-end eligibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakEndEligibility {
    /// Whether ending the break now is permitted.
    pub allowed: bool,
    /// Break minutes the current net work requires.
    pub required_minutes: i64,
    /// Break minutes taken so far, the open break included.
    pub taken_minutes: i64,
    /// Minutes still missing before the break may end.
    pub remaining_minutes: i64,
    /// User-facing explanation.
    pub message: String,
}

/// Evaluates whether an employee may end their current break.
///
/// `elapsed_minutes` is the time since clock-in; `break_taken_minutes` is
/// all break time taken so far including the currently open break. The net
/// work driving the tier is their difference, clamped at zero.
pub fn evaluate_break_end(
    elapsed_minutes: i64,
    break_taken_minutes: i64,
    settings: &ComplianceSettings,
) -> BreakEndEligibility {
    let net_work_minutes = (elapsed_minutes - break_taken_minutes).max(0);
    let required_minutes = required_break_minutes(net_work_minutes, settings);
    let remaining_minutes = (required_minutes - break_taken_minutes).max(0);
    let allowed = remaining_minutes == 0;

    let message = if allowed {
        format!(
            "Break requirement satisfied ({} of {} minutes taken)",
            break_taken_minutes, required_minutes
        )
    } else {
        format!(
            "{} more break minutes required before work may resume ({} of {} taken)",
            remaining_minutes, break_taken_minutes, required_minutes
        )
    };

    BreakEndEligibility {
        allowed,
        required_minutes,
        taken_minutes: break_taken_minutes,
        remaining_minutes,
        message,
    }
}

/// One rule breach found by the evaluator.
///
/// Findings are plain data; the recorder decides whether and how to persist
/// them. They are NOT errors and never block the triggering clock action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// The rule that was breached.
    pub violation_type: ViolationType,
    /// Human-readable rendering of the limit that applied.
    pub expected_value: String,
    /// Human-readable rendering of the observed value.
    pub actual_value: String,
}

impl Finding {
    /// Turns the finding into a persistable violation record.
    pub fn into_violation(
        self,
        employee_id: &str,
        time_entry_id: Option<Uuid>,
        shift_id: Option<Uuid>,
        now: NaiveDateTime,
    ) -> ComplianceViolation {
        ComplianceViolation {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            time_entry_id,
            shift_id,
            violation_type: self.violation_type,
            expected_value: self.expected_value,
            actual_value: self.actual_value,
            status: ViolationStatus::Open,
            created_at: now,
        }
    }
}

/// Evaluates a completed session against the daily limits.
///
/// `work_minutes` is the session's net worked minutes, `break_minutes` the
/// total break taken. The three checks are independent; in particular a
/// session with zero break and more than six hours of work produces BOTH an
/// insufficient-break and a missing-break finding.
pub fn evaluate_clock_out(
    work_minutes: i64,
    break_minutes: i64,
    settings: &ComplianceSettings,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    let max_daily = settings.max_daily_minutes();
    if work_minutes > max_daily {
        findings.push(Finding {
            violation_type: ViolationType::MaxDailyHoursExceeded,
            expected_value: format!("at most {} work minutes", max_daily),
            actual_value: format!("{} work minutes", work_minutes),
        });
    }

    let required = required_break_minutes(work_minutes, settings);
    if required > 0 && break_minutes < required {
        findings.push(Finding {
            violation_type: ViolationType::InsufficientBreak,
            expected_value: format!("at least {} break minutes", required),
            actual_value: format!("{} break minutes", break_minutes),
        });
    }

    if work_minutes > SIX_HOUR_TIER_MINUTES && break_minutes == 0 {
        findings.push(Finding {
            violation_type: ViolationType::MissingBreak,
            expected_value: "a break after six hours of work".to_string(),
            actual_value: "no break taken".to_string(),
        });
    }

    findings
}

/// Checks a single break segment against the minimum segment length.
///
/// A segment shorter than the configured minimum does not count as a break
/// under ArbZG §4, regardless of cumulative totals.
pub fn check_break_segment(
    duration_minutes: i64,
    settings: &ComplianceSettings,
) -> Option<Finding> {
    if duration_minutes < settings.min_break_segment_minutes {
        Some(Finding {
            violation_type: ViolationType::BreakSegmentTooShort,
            expected_value: format!(
                "segments of at least {} minutes",
                settings.min_break_segment_minutes
            ),
            actual_value: format!("{} minute segment", duration_minutes),
        })
    } else {
        None
    }
}
