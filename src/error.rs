//! Error types for the Time-Tracking & Compliance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during time tracking and
//! compliance evaluation.
//!
//! State-machine violations (wrong-state operations, duplicate open entries)
//! are blocking errors surfaced to the caller. Compliance findings are NOT
//! errors; they are data produced by the rule evaluator.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the Time-Tracking & Compliance Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use timeclock_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     employee_id: "emp_missing".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_missing");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The referenced employee does not exist.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee id that was not found.
        employee_id: String,
    },

    /// The referenced time entry does not exist (or was soft-deleted).
    #[error("Time entry not found: {entry_id}")]
    EntryNotFound {
        /// The entry id that was not found.
        entry_id: Uuid,
    },

    /// The referenced break does not exist.
    #[error("Break not found: {break_id}")]
    BreakNotFound {
        /// The break id that was not found.
        break_id: Uuid,
    },

    /// The referenced alert does not exist.
    #[error("Alert not found: {alert_id}")]
    AlertNotFound {
        /// The alert id that was not found.
        alert_id: Uuid,
    },

    /// The referenced violation record does not exist.
    #[error("Violation not found: {violation_id}")]
    ViolationNotFound {
        /// The violation id that was not found.
        violation_id: Uuid,
    },

    /// Clock-in attempted while an open entry already exists.
    #[error("Employee '{employee_id}' already has an open time entry")]
    ActiveEntryExists {
        /// The employee with the duplicate open entry.
        employee_id: String,
    },

    /// Operation requires an open entry but the employee has none.
    #[error("Employee '{employee_id}' is not clocked in")]
    NotClockedIn {
        /// The employee without an open entry.
        employee_id: String,
    },

    /// Break-end attempted while no break is open.
    #[error("Employee '{employee_id}' is not on break")]
    NotOnBreak {
        /// The employee without an open break.
        employee_id: String,
    },

    /// Break-start attempted while a break is already open.
    #[error("Employee '{employee_id}' already has an active break")]
    BreakAlreadyActive {
        /// The employee with the open break.
        employee_id: String,
    },

    /// Malformed input, temporal-sanity failure, or a settings update that
    /// would relax a statutory ArbZG bound.
    #[error("Invalid value for '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Settings file was not found at the specified path.
    #[error("Settings file not found: {path}")]
    SettingsNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Settings file could not be parsed.
    #[error("Failed to parse settings file '{path}': {message}")]
    SettingsParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An underlying store operation failed.
    #[error("Store operation failed: {message}")]
    StoreError {
        /// A description of the store failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
