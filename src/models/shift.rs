//! Shift assignment model.
//!
//! This module defines the ShiftAssignment struct representing a scheduled
//! (planned) shift, as opposed to the actually-worked time entries.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a scheduled shift for an employee.
///
/// Start and end are stored as times-of-day against the shift date; an
/// overnight shift is expressed by `end_time <= start_time` and resolves
/// its end to the following calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    /// Unique identifier for the shift.
    pub id: Uuid,
    /// The employee this shift is assigned to.
    pub employee_id: String,
    /// The calendar date the shift starts on.
    pub shift_date: NaiveDate,
    /// Time of day the shift starts.
    pub start_time: NaiveTime,
    /// Time of day the shift ends. On or before `start_time` means the
    /// shift ends on the following day.
    pub end_time: NaiveTime,
}

impl ShiftAssignment {
    /// Returns the absolute start timestamp of the shift.
    pub fn resolved_start(&self) -> NaiveDateTime {
        self.shift_date.and_time(self.start_time)
    }

    /// Returns the absolute end timestamp of the shift.
    ///
    /// Overnight shifts roll the end time to the next day.
    ///
    /// # Examples
    ///
    /// ```
    /// use timeclock_engine::models::ShiftAssignment;
    /// use chrono::{NaiveDate, NaiveTime};
    /// use uuid::Uuid;
    ///
    /// let shift = ShiftAssignment {
    ///     id: Uuid::new_v4(),
    ///     employee_id: "emp_001".to_string(),
    ///     shift_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
    ///     start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
    /// };
    /// assert_eq!(shift.resolved_end().date(), NaiveDate::from_ymd_opt(2026, 3, 3).unwrap());
    /// ```
    pub fn resolved_end(&self) -> NaiveDateTime {
        if self.end_time <= self.start_time {
            (self.shift_date + Duration::days(1)).and_time(self.end_time)
        } else {
            self.shift_date.and_time(self.end_time)
        }
    }

    /// Returns the scheduled duration of the shift in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.resolved_end() - self.resolved_start()).num_minutes()
    }
}
