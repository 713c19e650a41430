//! Clock event publication.
//!
//! Events are fire-and-forget notifications for downstream systems. A sink
//! failure is logged by the caller and never fails the triggering action.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::EngineResult;

/// A lifecycle event emitted by the time entry state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClockEvent {
    /// An employee clocked in.
    ClockedIn {
        /// The employee.
        employee_id: String,
        /// The created entry.
        entry_id: Uuid,
        /// Event timestamp.
        at: NaiveDateTime,
    },
    /// An employee clocked out.
    ClockedOut {
        /// The employee.
        employee_id: String,
        /// The closed entry.
        entry_id: Uuid,
        /// Event timestamp.
        at: NaiveDateTime,
    },
    /// An employee started a break.
    BreakStarted {
        /// The employee.
        employee_id: String,
        /// The parent entry.
        entry_id: Uuid,
        /// The created break.
        break_id: Uuid,
        /// Event timestamp.
        at: NaiveDateTime,
    },
    /// A break ended, explicitly or force-closed by a clock-out.
    BreakEnded {
        /// The employee.
        employee_id: String,
        /// The parent entry.
        entry_id: Uuid,
        /// The closed break.
        break_id: Uuid,
        /// Event timestamp.
        at: NaiveDateTime,
    },
}

/// Downstream notification boundary.
///
/// The transport is out of scope; implementations may enqueue, log, or drop.
pub trait EventSink: Send + Sync {
    /// Publishes one event. Errors are the sink's own failures; callers log
    /// them and move on.
    fn publish(&self, event: &ClockEvent) -> EngineResult<()>;
}

/// Sink that emits events as structured log lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, event: &ClockEvent) -> EngineResult<()> {
        match event {
            ClockEvent::ClockedIn {
                employee_id,
                entry_id,
                at,
            } => info!(employee_id = %employee_id, entry_id = %entry_id, at = %at, "clock-in"),
            ClockEvent::ClockedOut {
                employee_id,
                entry_id,
                at,
            } => info!(employee_id = %employee_id, entry_id = %entry_id, at = %at, "clock-out"),
            ClockEvent::BreakStarted {
                employee_id,
                break_id,
                at,
                ..
            } => info!(employee_id = %employee_id, break_id = %break_id, at = %at, "break-start"),
            ClockEvent::BreakEnded {
                employee_id,
                break_id,
                at,
                ..
            } => info!(employee_id = %employee_id, break_id = %break_id, at = %at, "break-end"),
        }
        Ok(())
    }
}
