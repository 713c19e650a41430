//! Employee status derivation.

use chrono::NaiveDateTime;

use crate::models::{ClockState, EmployeeTimeStatus, TimeBreak, TimeEntry};

/// Derives an [`EmployeeTimeStatus`] from store reads.
///
/// The status is a pure function of its inputs: no status field is ever
/// stored, so the view cannot drift from the entries. `today_entries` and
/// `week_entries` are expected to include the open entry (when its
/// `entry_date` falls in the range); `active_break_minutes` is the break
/// sum of the open entry measured against `now`.
pub fn derive_status(
    employee_id: &str,
    active_entry: Option<TimeEntry>,
    active_break: Option<TimeBreak>,
    active_break_minutes: i64,
    today_entries: &[TimeEntry],
    week_entries: &[TimeEntry],
    now: NaiveDateTime,
) -> EmployeeTimeStatus {
    let status = match (&active_entry, &active_break) {
        (None, _) => ClockState::ClockedOut,
        (Some(_), None) => ClockState::ClockedIn,
        (Some(_), Some(_)) => ClockState::OnBreak,
    };

    let live = |entries: &[TimeEntry]| -> (i64, i64) {
        entries.iter().fold((0, 0), |(work, breaks), entry| {
            if entry.is_open() {
                let taken = if Some(entry.id) == active_entry.as_ref().map(|e| e.id) {
                    active_break_minutes
                } else {
                    0
                };
                let net = (entry.gross_minutes(now) - taken).max(0);
                (work + net, breaks + taken)
            } else {
                (
                    work + entry.total_work_minutes,
                    breaks + entry.total_break_minutes,
                )
            }
        })
    };

    let (minutes_worked_today, minutes_break_today) = live(today_entries);
    let (minutes_worked_this_week, _) = live(week_entries);

    EmployeeTimeStatus {
        employee_id: employee_id.to_string(),
        status,
        active_entry,
        active_break,
        minutes_worked_today,
        minutes_break_today,
        minutes_worked_this_week,
    }
}
