//! Core data models for the Time-Tracking & Compliance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod compliance;
mod shift;
mod status;
mod time_entry;

pub use compliance::{
    AlertSeverity, AlertType, ComplianceAlert, ComplianceViolation, ViolationStatus, ViolationType,
};
pub use shift::ShiftAssignment;
pub use status::{ClockState, EmployeeTimeStatus};
pub use time_entry::{TimeBreak, TimeEntry};
