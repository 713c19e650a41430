//! Clock store collaborator interface.

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{TimeBreak, TimeEntry};

/// Persistence boundary for time entries and breaks.
///
/// Implementations MUST enforce two invariants, because the state machine
/// performs read-then-write and is not safe against races on its own:
///
/// - at most one entry per employee with `clock_out == None`
///   (`create_entry`/`update_entry` fail with `ActiveEntryExists`)
/// - at most one break per entry with `end_time == None`
///   (`create_break`/`replace_breaks` fail with `BreakAlreadyActive`)
///
/// Soft-deleted entries are invisible to every query.
pub trait ClockStore: Send + Sync {
    /// Returns whether the employee is known to the system.
    fn employee_exists(&self, employee_id: &str) -> EngineResult<bool>;

    /// Returns the employee's open entry, if any.
    fn get_active_entry(&self, employee_id: &str) -> EngineResult<Option<TimeEntry>>;

    /// Returns an entry by id.
    fn get_entry(&self, entry_id: Uuid) -> EngineResult<Option<TimeEntry>>;

    /// Persists a new entry.
    fn create_entry(&self, entry: TimeEntry) -> EngineResult<TimeEntry>;

    /// Overwrites an existing entry.
    fn update_entry(&self, entry: TimeEntry) -> EngineResult<TimeEntry>;

    /// Returns the entry's open break, if any.
    fn get_active_break(&self, entry_id: Uuid) -> EngineResult<Option<TimeBreak>>;

    /// Persists a new break under its entry.
    fn create_break(&self, brk: TimeBreak) -> EngineResult<TimeBreak>;

    /// Overwrites an existing break.
    fn update_break(&self, brk: TimeBreak) -> EngineResult<TimeBreak>;

    /// Returns all breaks of an entry ordered by start time.
    fn list_breaks(&self, entry_id: Uuid) -> EngineResult<Vec<TimeBreak>>;

    /// Replaces all breaks of an entry in one step, atomic from the
    /// caller's perspective.
    fn replace_breaks(&self, entry_id: Uuid, breaks: Vec<TimeBreak>)
    -> EngineResult<Vec<TimeBreak>>;

    /// Sums the entry's break durations in whole minutes; an open break is
    /// measured against `now`.
    fn sum_break_minutes(&self, entry_id: Uuid, now: NaiveDateTime) -> EngineResult<i64>;

    /// Returns the employee's entries whose `entry_date` lies in
    /// `[from, to]`, ordered by clock-in.
    fn list_entries(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<TimeEntry>>;
}
