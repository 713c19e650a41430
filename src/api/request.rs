//! Request types for the Time-Tracking & Compliance Engine API.
//!
//! This module defines the JSON request structures for the clock, entry
//! correction, settings, and shift-validation endpoints.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ComplianceSettings;
use crate::tracking::{BreakSpec, EntryPatch, Patch};

/// Request body for the clock-in/out and break start/end endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockActionRequest {
    /// The employee performing the clock action.
    pub employee_id: String,
}

/// Request body for a manager-initiated clock-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualClockInRequest {
    /// The employee being clocked in.
    pub employee_id: String,
    /// The (possibly backdated) clock-in timestamp.
    pub timestamp: NaiveDateTime,
    /// The acting manager.
    pub actor_id: String,
    /// Optional correction note.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request body for a manager-initiated clock-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualClockOutRequest {
    /// The employee being clocked out.
    pub employee_id: String,
    /// The clock-out timestamp.
    pub timestamp: NaiveDateTime,
    /// The acting manager.
    pub actor_id: String,
}

/// Request body for a partial entry update.
///
/// `clock_out` keeps the absent / `null` / value distinction: an omitted
/// field changes nothing, an explicit `null` clears the clock-out and
/// reopens the session, a timestamp closes it and recomputes the totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryPatchRequest {
    /// New clock-in, if present.
    #[serde(default)]
    pub clock_in: Option<NaiveDateTime>,
    /// Three-way clock-out update.
    #[serde(default, skip_serializing_if = "Patch::is_unset")]
    pub clock_out: Patch<NaiveDateTime>,
    /// New notes, if present.
    #[serde(default)]
    pub notes: Option<String>,
    /// The acting manager.
    pub actor_id: String,
}

impl From<EntryPatchRequest> for EntryPatch {
    fn from(req: EntryPatchRequest) -> Self {
        EntryPatch {
            clock_in: req.clock_in,
            clock_out: req.clock_out,
            notes: req.notes,
        }
    }
}

/// One break in a replace-breaks request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakItemRequest {
    /// Break start.
    pub start_time: NaiveDateTime,
    /// Break end; omit to leave the break open.
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
}

impl From<BreakItemRequest> for BreakSpec {
    fn from(req: BreakItemRequest) -> Self {
        BreakSpec {
            start_time: req.start_time,
            end_time: req.end_time,
        }
    }
}

/// Request body for replacing all breaks of an entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceBreaksRequest {
    /// The full new break set.
    pub breaks: Vec<BreakItemRequest>,
    /// The acting manager.
    pub actor_id: String,
}

/// Request body for validating a proposed shift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftValidationRequest {
    /// The employee the shift would be assigned to.
    pub employee_id: String,
    /// Proposed absolute start.
    pub start_time: NaiveDateTime,
    /// Proposed absolute end.
    pub end_time: NaiveDateTime,
}

/// Request body for updating the tenant's compliance settings.
///
/// All fields are required; partial settings updates are not supported, so
/// a client cannot accidentally reset fields it did not mention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsUpdateRequest {
    /// Minimum break minutes once net work exceeds six hours.
    pub min_break_6h_minutes: i64,
    /// Minimum break minutes once net work exceeds nine hours.
    pub min_break_9h_minutes: i64,
    /// Minimum length of a single break segment.
    pub min_break_segment_minutes: i64,
    /// Maximum net daily working hours.
    pub max_daily_hours: Decimal,
    /// Maximum weekly working hours.
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

impl From<SettingsUpdateRequest> for ComplianceSettings {
    fn from(req: SettingsUpdateRequest) -> Self {
        ComplianceSettings {
            min_break_6h_minutes: req.min_break_6h_minutes,
            min_break_9h_minutes: req.min_break_9h_minutes,
            min_break_segment_minutes: req.min_break_segment_minutes,
            max_daily_hours: req.max_daily_hours,
            max_weekly_hours: req.max_weekly_hours,
            min_rest_between_shifts_hours: req.min_rest_between_shifts_hours,
            alert_no_break_after_minutes: req.alert_no_break_after_minutes,
            alert_break_too_long_minutes: req.alert_break_too_long_minutes,
            alert_approaching_max_hours_minutes: req.alert_approaching_max_hours_minutes,
        }
    }
}
