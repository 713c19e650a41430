//! Compliance violation and alert models.
//!
//! A violation is an immutable audit fact about a session's non-compliance.
//! An alert is a live, dismissible, deduplicated signal about an employee's
//! current state. The two have different lifecycles and must not be mixed.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of labor-law rule a violation records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationType {
    /// Net daily work time exceeded the configured daily maximum.
    MaxDailyHoursExceeded,
    /// Total break taken was below the tier required for the work performed.
    InsufficientBreak,
    /// More than six hours worked with no break at all.
    MissingBreak,
    /// A single break segment was shorter than the minimum segment length.
    BreakSegmentTooShort,
    /// Rest period between two shifts was below the configured floor.
    RestPeriodTooShort,
    /// Committed weekly hours exceeded the configured weekly maximum.
    MaxWeeklyHoursExceeded,
}

/// Lifecycle status of a violation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationStatus {
    /// Recorded and awaiting review.
    Open,
    /// Reviewed and acknowledged by a manager.
    Acknowledged,
}

/// An immutable audit record of a compliance breach.
///
/// Created by the recorder from evaluator output, never from direct user
/// input. The only permitted mutation is the open → acknowledged transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceViolation {
    /// Unique identifier for the violation.
    pub id: Uuid,
    /// The employee the violation concerns.
    pub employee_id: String,
    /// The time entry the violation was derived from, if any.
    pub time_entry_id: Option<Uuid>,
    /// The shift assignment the violation was derived from, if any.
    pub shift_id: Option<Uuid>,
    /// The rule that was breached.
    pub violation_type: ViolationType,
    /// Human-readable rendering of the limit that applied.
    pub expected_value: String,
    /// Human-readable rendering of the observed value.
    pub actual_value: String,
    /// Review status.
    pub status: ViolationStatus,
    /// When the violation was recorded.
    pub created_at: NaiveDateTime,
}

/// The condition an alert signals about a currently active employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    /// Worked past the no-break threshold without any break.
    NoBreakTaken,
    /// The currently open break has run past the configured limit.
    BreakTooLong,
    /// Remaining daily work minutes are within the warning threshold.
    ApproachingMaxHours,
    /// The daily maximum has already been exceeded.
    MaxHoursExceeded,
}

/// How urgently an alert should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    /// Informational only.
    Info,
    /// Needs attention soon.
    Warning,
    /// A limit has been breached.
    Critical,
}

/// A live, dismissible compliance signal.
///
/// Alerts are deduplicated per (employee, alert type): creating a new alert
/// of a type first deactivates prior active alerts of that type for that
/// employee. Dismissing sets `is_active = false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceAlert {
    /// Unique identifier for the alert.
    pub id: Uuid,
    /// The employee the alert concerns.
    pub employee_id: String,
    /// The condition being signalled.
    pub alert_type: AlertType,
    /// Urgency of the signal.
    pub severity: AlertSeverity,
    /// User-facing message.
    pub message: String,
    /// Whether the alert is currently live.
    pub is_active: bool,
    /// When the alert was created.
    pub created_at: NaiveDateTime,
}
