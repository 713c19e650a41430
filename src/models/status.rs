//! Derived employee time status.
//!
//! The status view is computed from the active entry/break and aggregated
//! minute sums; it is never stored, so it cannot drift from the entries.

use serde::{Deserialize, Serialize};

use super::{TimeBreak, TimeEntry};

/// The clock state of an employee, derived from open entry/break presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockState {
    /// No open time entry.
    ClockedOut,
    /// Open entry, no open break.
    ClockedIn,
    /// Open entry with an open break.
    OnBreak,
}

/// A point-in-time view of an employee's clock state and minute totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeTimeStatus {
    /// The employee this status describes.
    pub employee_id: String,
    /// Derived clock state.
    pub status: ClockState,
    /// The open entry, if any.
    pub active_entry: Option<TimeEntry>,
    /// The open break, if any.
    pub active_break: Option<TimeBreak>,
    /// Net minutes worked today (completed entries plus the running session).
    pub minutes_worked_today: i64,
    /// Break minutes taken today.
    pub minutes_break_today: i64,
    /// Net minutes worked in the current ISO week (Monday start).
    pub minutes_worked_this_week: i64,
}
