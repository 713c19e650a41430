//! The time entry state machine.
//!
//! States: CLOCKED_OUT → CLOCKED_IN → ON_BREAK → CLOCKED_IN → CLOCKED_OUT,
//! derived from open-entry/open-break presence rather than a stored field.
//! All wrong-state operations fail with blocking errors; compliance
//! evaluation on clock-out is best-effort and never fails the clock action.

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use tracing::warn;
use uuid::Uuid;

use crate::compliance::{
    BreakEndEligibility, Finding, check_break_segment, evaluate_break_end, evaluate_clock_out,
};
use crate::config::SettingsStore;
use crate::error::{EngineError, EngineResult};
use crate::events::{ClockEvent, EventSink};
use crate::models::{EmployeeTimeStatus, TimeBreak, TimeEntry};
use crate::store::{ClockStore, ComplianceStore};

use super::patch::Patch;
use super::status::derive_status;

/// A partial update to a time entry.
///
/// `clock_out` carries three-way semantics: [`Patch::Unset`] leaves the
/// field unchanged, [`Patch::Clear`] reopens the session and zeroes both
/// totals, [`Patch::Set`] closes it and recomputes the totals.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    /// New clock-in timestamp, if present.
    pub clock_in: Option<NaiveDateTime>,
    /// Three-way clock-out update.
    pub clock_out: Patch<NaiveDateTime>,
    /// New notes, if present.
    pub notes: Option<String>,
}

/// One break in a replace-breaks request.
#[derive(Debug, Clone)]
pub struct BreakSpec {
    /// Break start.
    pub start_time: NaiveDateTime,
    /// Break end; `None` leaves the break open.
    pub end_time: Option<NaiveDateTime>,
}

/// The time entry state machine service.
///
/// Reads and writes through the [`ClockStore`]; the store enforces the
/// one-open-entry and one-open-break invariants, so concurrent duplicate
/// requests resolve to exactly one winner.
pub struct TimeTrackingService {
    clock: Arc<dyn ClockStore>,
    compliance: Arc<dyn ComplianceStore>,
    settings: Arc<dyn SettingsStore>,
    events: Arc<dyn EventSink>,
}

impl TimeTrackingService {
    /// Creates a service over the given collaborators.
    pub fn new(
        clock: Arc<dyn ClockStore>,
        compliance: Arc<dyn ComplianceStore>,
        settings: Arc<dyn SettingsStore>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            clock,
            compliance,
            settings,
            events,
        }
    }

    fn emit(&self, event: ClockEvent) {
        if let Err(err) = self.events.publish(&event) {
            warn!(error = %err, "event publication failed");
        }
    }

    fn require_employee(&self, employee_id: &str) -> EngineResult<()> {
        if self.clock.employee_exists(employee_id)? {
            Ok(())
        } else {
            Err(EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
        }
    }

    fn require_active_entry(&self, employee_id: &str) -> EngineResult<TimeEntry> {
        self.clock
            .get_active_entry(employee_id)?
            .ok_or_else(|| EngineError::NotClockedIn {
                employee_id: employee_id.to_string(),
            })
    }

    /// Clocks an employee in, creating a fresh open entry.
    pub fn clock_in(&self, employee_id: &str, now: NaiveDateTime) -> EngineResult<TimeEntry> {
        self.require_employee(employee_id)?;
        if self.clock.get_active_entry(employee_id)?.is_some() {
            return Err(EngineError::ActiveEntryExists {
                employee_id: employee_id.to_string(),
            });
        }

        let entry = self.clock.create_entry(TimeEntry::open(employee_id, now))?;
        self.emit(ClockEvent::ClockedIn {
            employee_id: employee_id.to_string(),
            entry_id: entry.id,
            at: now,
        });
        Ok(entry)
    }

    /// Clocks an employee out.
    ///
    /// A still-open break is force-closed first and published as a break-end
    /// event. Afterwards the clock-out compliance checks run best-effort:
    /// their findings are persisted as violations, and any evaluator or
    /// store failure is logged without failing the clock-out.
    pub fn clock_out(
        &self,
        tenant: &str,
        employee_id: &str,
        now: NaiveDateTime,
    ) -> EngineResult<TimeEntry> {
        let mut entry = self.require_active_entry(employee_id)?;

        if let Some(mut open_break) = self.clock.get_active_break(entry.id)? {
            open_break.end_time = Some(now);
            let closed = self.clock.update_break(open_break)?;
            self.emit(ClockEvent::BreakEnded {
                employee_id: employee_id.to_string(),
                entry_id: entry.id,
                break_id: closed.id,
                at: now,
            });
        }

        let break_minutes = self.clock.sum_break_minutes(entry.id, now)?;
        entry.clock_out = Some(now);
        entry.recompute_totals(break_minutes);
        let entry = self.clock.update_entry(entry)?;

        self.emit(ClockEvent::ClockedOut {
            employee_id: employee_id.to_string(),
            entry_id: entry.id,
            at: now,
        });

        self.record_clock_out_findings(tenant, &entry, now);
        Ok(entry)
    }

    /// Starts a break on the employee's open entry.
    pub fn start_break(&self, employee_id: &str, now: NaiveDateTime) -> EngineResult<TimeBreak> {
        let entry = self.require_active_entry(employee_id)?;
        if self.clock.get_active_break(entry.id)?.is_some() {
            return Err(EngineError::BreakAlreadyActive {
                employee_id: employee_id.to_string(),
            });
        }

        let brk = self.clock.create_break(TimeBreak {
            id: Uuid::new_v4(),
            time_entry_id: entry.id,
            start_time: now,
            end_time: None,
        })?;
        self.emit(ClockEvent::BreakStarted {
            employee_id: employee_id.to_string(),
            entry_id: entry.id,
            break_id: brk.id,
            at: now,
        });
        Ok(brk)
    }

    /// Ends the employee's open break.
    pub fn end_break(&self, employee_id: &str, now: NaiveDateTime) -> EngineResult<TimeBreak> {
        let entry = self.require_active_entry(employee_id)?;
        let mut brk =
            self.clock
                .get_active_break(entry.id)?
                .ok_or_else(|| EngineError::NotOnBreak {
                    employee_id: employee_id.to_string(),
                })?;

        brk.end_time = Some(now);
        let brk = self.clock.update_break(brk)?;
        self.emit(ClockEvent::BreakEnded {
            employee_id: employee_id.to_string(),
            entry_id: entry.id,
            break_id: brk.id,
            at: now,
        });
        Ok(brk)
    }

    /// Checks whether the employee may end their current break yet.
    pub fn break_end_eligibility(
        &self,
        tenant: &str,
        employee_id: &str,
        now: NaiveDateTime,
    ) -> EngineResult<BreakEndEligibility> {
        let entry = self.require_active_entry(employee_id)?;
        let settings = self.settings.get(tenant)?;
        let elapsed = entry.gross_minutes(now);
        let taken = self.clock.sum_break_minutes(entry.id, now)?;
        Ok(evaluate_break_end(elapsed, taken, &settings))
    }

    /// Runs the clock-out compliance checks against the live session
    /// without closing it.
    pub fn clock_out_check(
        &self,
        tenant: &str,
        employee_id: &str,
        now: NaiveDateTime,
    ) -> EngineResult<Vec<Finding>> {
        let entry = self.require_active_entry(employee_id)?;
        let settings = self.settings.get(tenant)?;
        let break_minutes = self.clock.sum_break_minutes(entry.id, now)?;
        let net_work = (entry.gross_minutes(now) - break_minutes).max(0);

        let mut findings = evaluate_clock_out(net_work, break_minutes, &settings);
        for brk in self.clock.list_breaks(entry.id)? {
            if let Some(finding) = check_break_segment(brk.duration_minutes(now), &settings) {
                findings.push(finding);
            }
        }
        Ok(findings)
    }

    /// Manager-initiated clock-in at an explicit timestamp.
    ///
    /// Future-dated clock-ins are rejected; the entry is marked manual and
    /// attributed to the acting manager.
    pub fn manual_clock_in(
        &self,
        employee_id: &str,
        timestamp: NaiveDateTime,
        actor_id: &str,
        notes: Option<String>,
        now: NaiveDateTime,
    ) -> EngineResult<TimeEntry> {
        self.require_employee(employee_id)?;
        if timestamp > now {
            return Err(EngineError::InvalidInput {
                field: "timestamp".to_string(),
                message: "manual clock-in must not be in the future".to_string(),
            });
        }
        if self.clock.get_active_entry(employee_id)?.is_some() {
            return Err(EngineError::ActiveEntryExists {
                employee_id: employee_id.to_string(),
            });
        }

        let mut entry = TimeEntry::open(employee_id, timestamp);
        entry.is_manual_entry = true;
        entry.created_by = Some(actor_id.to_string());
        entry.notes = notes;
        let entry = self.clock.create_entry(entry)?;

        self.emit(ClockEvent::ClockedIn {
            employee_id: employee_id.to_string(),
            entry_id: entry.id,
            at: timestamp,
        });
        Ok(entry)
    }

    /// Manager-initiated clock-out at an explicit timestamp.
    ///
    /// The timestamp must not precede the entry's clock-in (nor an open
    /// break's start). Marks the entry manual and records the actor.
    pub fn manual_clock_out(
        &self,
        tenant: &str,
        employee_id: &str,
        timestamp: NaiveDateTime,
        actor_id: &str,
    ) -> EngineResult<TimeEntry> {
        let mut entry = self.require_active_entry(employee_id)?;
        if timestamp < entry.clock_in {
            return Err(EngineError::InvalidInput {
                field: "timestamp".to_string(),
                message: "manual clock-out must not precede the clock-in".to_string(),
            });
        }

        if let Some(mut open_break) = self.clock.get_active_break(entry.id)? {
            if open_break.start_time > timestamp {
                return Err(EngineError::InvalidInput {
                    field: "timestamp".to_string(),
                    message: "manual clock-out must not precede the open break".to_string(),
                });
            }
            open_break.end_time = Some(timestamp);
            let closed = self.clock.update_break(open_break)?;
            self.emit(ClockEvent::BreakEnded {
                employee_id: employee_id.to_string(),
                entry_id: entry.id,
                break_id: closed.id,
                at: timestamp,
            });
        }

        let break_minutes = self.clock.sum_break_minutes(entry.id, timestamp)?;
        entry.clock_out = Some(timestamp);
        entry.is_manual_entry = true;
        entry.updated_by = Some(actor_id.to_string());
        entry.recompute_totals(break_minutes);
        let entry = self.clock.update_entry(entry)?;

        self.emit(ClockEvent::ClockedOut {
            employee_id: employee_id.to_string(),
            entry_id: entry.id,
            at: timestamp,
        });
        self.record_clock_out_findings(tenant, &entry, timestamp);
        Ok(entry)
    }

    /// Applies a partial update to an entry, re-deriving the totals.
    ///
    /// Always marks the entry manual and records the actor. Reopening via
    /// `Patch::Clear` fails with `ActiveEntryExists` if the employee
    /// already has another open entry (store-enforced).
    pub fn update_entry(
        &self,
        entry_id: Uuid,
        patch: EntryPatch,
        actor_id: &str,
        now: NaiveDateTime,
    ) -> EngineResult<TimeEntry> {
        let mut entry = self
            .clock
            .get_entry(entry_id)?
            .ok_or(EngineError::EntryNotFound { entry_id })?;

        if let Some(clock_in) = patch.clock_in {
            entry.clock_in = clock_in;
            entry.entry_date = clock_in.date();
        }
        match patch.clock_out {
            Patch::Unset => {}
            Patch::Clear => entry.clock_out = None,
            Patch::Set(timestamp) => entry.clock_out = Some(timestamp),
        }
        if let Some(out) = entry.clock_out {
            if out < entry.clock_in {
                return Err(EngineError::InvalidInput {
                    field: "clock_out".to_string(),
                    message: "clock-out must not precede the clock-in".to_string(),
                });
            }
        }
        if let Some(notes) = patch.notes {
            entry.notes = Some(notes);
        }

        entry.is_manual_entry = true;
        entry.updated_by = Some(actor_id.to_string());
        let break_minutes = self
            .clock
            .sum_break_minutes(entry.id, entry.clock_out.unwrap_or(now))?;
        entry.recompute_totals(break_minutes);
        self.clock.update_entry(entry)
    }

    /// Replaces all breaks of an entry, then recalculates its totals.
    ///
    /// Delete-then-recreate is atomic from the caller's perspective; the
    /// store swaps the whole set in one step.
    pub fn replace_breaks(
        &self,
        entry_id: Uuid,
        breaks: Vec<BreakSpec>,
        actor_id: &str,
        now: NaiveDateTime,
    ) -> EngineResult<(TimeEntry, Vec<TimeBreak>)> {
        let mut entry = self
            .clock
            .get_entry(entry_id)?
            .ok_or(EngineError::EntryNotFound { entry_id })?;

        let mut replacement = Vec::with_capacity(breaks.len());
        for spec in breaks {
            if let Some(end) = spec.end_time {
                if end < spec.start_time {
                    return Err(EngineError::InvalidInput {
                        field: "breaks".to_string(),
                        message: "break end must not precede its start".to_string(),
                    });
                }
            }
            replacement.push(TimeBreak {
                id: Uuid::new_v4(),
                time_entry_id: entry_id,
                start_time: spec.start_time,
                end_time: spec.end_time,
            });
        }

        let stored = self.clock.replace_breaks(entry_id, replacement)?;
        let break_minutes = self
            .clock
            .sum_break_minutes(entry_id, entry.clock_out.unwrap_or(now))?;
        entry.is_manual_entry = true;
        entry.updated_by = Some(actor_id.to_string());
        entry.recompute_totals(break_minutes);
        let entry = self.clock.update_entry(entry)?;
        Ok((entry, stored))
    }

    /// Soft-deletes an entry.
    pub fn delete_entry(&self, entry_id: Uuid, actor_id: &str) -> EngineResult<()> {
        let mut entry = self
            .clock
            .get_entry(entry_id)?
            .ok_or(EngineError::EntryNotFound { entry_id })?;
        entry.deleted = true;
        entry.updated_by = Some(actor_id.to_string());
        self.clock.update_entry(entry)?;
        Ok(())
    }

    /// Returns the employee's derived status view.
    pub fn status(
        &self,
        employee_id: &str,
        now: NaiveDateTime,
    ) -> EngineResult<EmployeeTimeStatus> {
        self.require_employee(employee_id)?;

        let active_entry = self.clock.get_active_entry(employee_id)?;
        let (active_break, active_break_minutes) = match &active_entry {
            Some(entry) => (
                self.clock.get_active_break(entry.id)?,
                self.clock.sum_break_minutes(entry.id, now)?,
            ),
            None => (None, 0),
        };

        let today = now.date();
        let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
        let sunday = monday + Duration::days(6);
        let today_entries = self.clock.list_entries(employee_id, today, today)?;
        let week_entries = self.clock.list_entries(employee_id, monday, sunday)?;

        Ok(derive_status(
            employee_id,
            active_entry,
            active_break,
            active_break_minutes,
            &today_entries,
            &week_entries,
            now,
        ))
    }

    /// Returns the employee's entries with `entry_date` in `[from, to]`.
    pub fn history(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<TimeEntry>> {
        self.require_employee(employee_id)?;
        self.clock.list_entries(employee_id, from, to)
    }

    /// Best-effort persistence of the clock-out compliance findings.
    ///
    /// Evaluator input comes from the already-committed entry; a settings
    /// or store failure is logged and swallowed so the clock-out itself
    /// never fails on compliance bookkeeping.
    fn record_clock_out_findings(&self, tenant: &str, entry: &TimeEntry, now: NaiveDateTime) {
        let settings = match self.settings.get(tenant) {
            Ok(settings) => settings,
            Err(err) => {
                warn!(
                    employee_id = %entry.employee_id,
                    error = %err,
                    "skipping clock-out compliance checks: settings unavailable"
                );
                return;
            }
        };

        let mut findings = evaluate_clock_out(
            entry.total_work_minutes,
            entry.total_break_minutes,
            &settings,
        );
        match self.clock.list_breaks(entry.id) {
            Ok(breaks) => {
                for brk in breaks {
                    if let Some(finding) = check_break_segment(brk.duration_minutes(now), &settings)
                    {
                        findings.push(finding);
                    }
                }
            }
            Err(err) => {
                warn!(
                    employee_id = %entry.employee_id,
                    error = %err,
                    "skipping break-segment checks: breaks unavailable"
                );
            }
        }

        for finding in findings {
            let violation =
                finding.into_violation(&entry.employee_id, Some(entry.id), None, now);
            if let Err(err) = self.compliance.record_violation(violation) {
                warn!(
                    employee_id = %entry.employee_id,
                    error = %err,
                    "failed to persist compliance violation"
                );
            }
        }
    }
}
