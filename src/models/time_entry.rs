//! Time entry and break models.
//!
//! This module defines the TimeEntry and TimeBreak structs for representing
//! continuous work sessions and the breaks taken within them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a break taken within a time entry.
///
/// A break with `end_time == None` is open (in progress). At most one open
/// break may exist per entry at any instant; the clock store enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBreak {
    /// Unique identifier for the break.
    pub id: Uuid,
    /// The entry this break belongs to.
    pub time_entry_id: Uuid,
    /// The start time of the break.
    pub start_time: NaiveDateTime,
    /// The end time of the break, or `None` while the break is open.
    pub end_time: Option<NaiveDateTime>,
}

impl TimeBreak {
    /// Returns true if the break has no end time yet.
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Returns the duration of the break in whole minutes.
    ///
    /// An open break is measured against `now`.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeclock_engine::models::TimeBreak;
    /// use chrono::NaiveDateTime;
    /// use uuid::Uuid;
    ///
    /// let brk = TimeBreak {
    ///     id: Uuid::new_v4(),
    ///     time_entry_id: Uuid::new_v4(),
    ///     start_time: NaiveDateTime::parse_from_str("2026-03-02 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     end_time: None,
    /// };
    /// let now = NaiveDateTime::parse_from_str("2026-03-02 12:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// assert_eq!(brk.duration_minutes(now), 30);
    /// ```
    pub fn duration_minutes(&self, now: NaiveDateTime) -> i64 {
        (self.end_time.unwrap_or(now) - self.start_time).num_minutes()
    }
}

/// Represents one continuous work session of an employee.
///
/// An entry is keyed by the calendar date it started on; a session may
/// logically span midnight. An entry with `clock_out == None` is open.
/// At most one open entry may exist per employee at any instant; the clock
/// store enforces this.
///
/// Entries are soft-deleted, never hard-deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// The employee this entry belongs to.
    pub employee_id: String,
    /// The calendar date the session started on.
    pub entry_date: NaiveDate,
    /// The clock-in timestamp.
    pub clock_in: NaiveDateTime,
    /// The clock-out timestamp, or `None` while the session is open.
    pub clock_out: Option<NaiveDateTime>,
    /// Net worked minutes: gross session minutes minus break minutes,
    /// clamped at zero. Zero while the session is open.
    pub total_work_minutes: i64,
    /// Sum of all break durations in whole minutes. Zero while open.
    pub total_break_minutes: i64,
    /// True if the entry was created or edited by a manager correction.
    pub is_manual_entry: bool,
    /// Free-form notes.
    pub notes: Option<String>,
    /// The actor who created the entry (manual entries only).
    pub created_by: Option<String>,
    /// The actor who last edited the entry (manual edits only).
    pub updated_by: Option<String>,
    /// Soft-delete marker.
    #[serde(default)]
    pub deleted: bool,
}

impl TimeEntry {
    /// Creates a new open entry for a clock-in at `now`.
    pub fn open(employee_id: impl Into<String>, now: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.into(),
            entry_date: now.date(),
            clock_in: now,
            clock_out: None,
            total_work_minutes: 0,
            total_break_minutes: 0,
            is_manual_entry: false,
            notes: None,
            created_by: None,
            updated_by: None,
            deleted: false,
        }
    }

    /// Returns true if the session has no clock-out yet.
    pub fn is_open(&self) -> bool {
        self.clock_out.is_none()
    }

    /// Returns the gross session duration in whole minutes.
    ///
    /// An open session is measured against `now`.
    pub fn gross_minutes(&self, now: NaiveDateTime) -> i64 {
        (self.clock_out.unwrap_or(now) - self.clock_in).num_minutes()
    }

    /// Re-derives both minute totals from the clock range and the given
    /// break-minute sum.
    ///
    /// While the session is open both totals are zero. For a closed session
    /// `total_work_minutes = max(0, gross - breaks)`; the clamp keeps a
    /// session whose breaks exceed its gross span from going negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeclock_engine::models::TimeEntry;
    /// use chrono::NaiveDateTime;
    ///
    /// let parse = |s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
    /// let mut entry = TimeEntry::open("emp_001", parse("2026-03-02 08:00:00"));
    /// entry.clock_out = Some(parse("2026-03-02 16:30:00"));
    /// entry.recompute_totals(30);
    /// assert_eq!(entry.total_work_minutes, 480);
    /// assert_eq!(entry.total_break_minutes, 30);
    /// ```
    pub fn recompute_totals(&mut self, break_minutes: i64) {
        match self.clock_out {
            Some(out) => {
                let gross = (out - self.clock_in).num_minutes();
                self.total_break_minutes = break_minutes;
                self.total_work_minutes = (gross - break_minutes).max(0);
            }
            None => {
                self.total_break_minutes = 0;
                self.total_work_minutes = 0;
            }
        }
    }
}
