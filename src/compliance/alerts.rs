//! Alert recording for active employees.
//!
//! The recorder turns live-session conditions into deduplicated alerts.
//! Alert creation failures are logged, never propagated: alerting is
//! best-effort telemetry, not a blocking gate.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::warn;
use uuid::Uuid;

use crate::config::{ComplianceSettings, SettingsStore};
use crate::error::{EngineError, EngineResult};
use crate::models::{AlertSeverity, AlertType, ComplianceAlert};
use crate::store::{ClockStore, ComplianceStore};

/// One alert condition found to hold for an active employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AlertCondition {
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub message: String,
}

/// Evaluates the four independent alert conditions for a live session.
///
/// `elapsed_minutes` is time since clock-in, `break_minutes` all break time
/// taken so far, `open_break_minutes` the running length of an open break.
/// Pure and idempotent.
pub(crate) fn evaluate_alert_conditions(
    elapsed_minutes: i64,
    break_minutes: i64,
    open_break_minutes: Option<i64>,
    settings: &ComplianceSettings,
) -> Vec<AlertCondition> {
    let mut conditions = Vec::new();

    if break_minutes == 0 && elapsed_minutes >= settings.alert_no_break_after_minutes {
        conditions.push(AlertCondition {
            alert_type: AlertType::NoBreakTaken,
            severity: AlertSeverity::Warning,
            message: format!(
                "No break taken after {} minutes of work",
                elapsed_minutes
            ),
        });
    }

    if let Some(open) = open_break_minutes {
        if open > settings.alert_break_too_long_minutes {
            conditions.push(AlertCondition {
                alert_type: AlertType::BreakTooLong,
                severity: AlertSeverity::Warning,
                message: format!("Break has been running for {} minutes", open),
            });
        }
    }

    let net_work = (elapsed_minutes - break_minutes).max(0);
    let remaining = settings.max_daily_minutes() - net_work;
    if remaining > 0 && remaining <= settings.alert_approaching_max_hours_minutes {
        conditions.push(AlertCondition {
            alert_type: AlertType::ApproachingMaxHours,
            severity: AlertSeverity::Warning,
            message: format!("{} minutes left until the daily maximum", remaining),
        });
    }
    if net_work > settings.max_daily_minutes() {
        conditions.push(AlertCondition {
            alert_type: AlertType::MaxHoursExceeded,
            severity: AlertSeverity::Critical,
            message: format!(
                "Daily maximum exceeded: {} of {} minutes worked",
                net_work,
                settings.max_daily_minutes()
            ),
        });
    }

    conditions
}

/// Evaluates alert conditions for active employees and records them.
pub struct AlertRecorder {
    clock: Arc<dyn ClockStore>,
    compliance: Arc<dyn ComplianceStore>,
    settings: Arc<dyn SettingsStore>,
}

impl AlertRecorder {
    /// Creates a recorder over the given collaborators.
    pub fn new(
        clock: Arc<dyn ClockStore>,
        compliance: Arc<dyn ComplianceStore>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            clock,
            compliance,
            settings,
        }
    }

    /// Re-evaluates the alert conditions for one employee.
    ///
    /// For each condition that holds, prior active alerts of the same type
    /// are deactivated and a fresh alert is created (atomically, inside the
    /// store). Conditions that no longer hold leave existing alerts
    /// untouched. A clocked-out employee produces no alerts. Individual
    /// creation failures are logged and skipped.
    pub fn refresh(
        &self,
        tenant: &str,
        employee_id: &str,
        now: NaiveDateTime,
    ) -> EngineResult<Vec<ComplianceAlert>> {
        if !self.clock.employee_exists(employee_id)? {
            return Err(EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            });
        }
        let Some(entry) = self.clock.get_active_entry(employee_id)? else {
            return Ok(Vec::new());
        };

        let settings = self.settings.get(tenant)?;
        let elapsed = entry.gross_minutes(now);
        let break_minutes = self.clock.sum_break_minutes(entry.id, now)?;
        let open_break_minutes = self
            .clock
            .get_active_break(entry.id)?
            .map(|b| b.duration_minutes(now));

        let conditions =
            evaluate_alert_conditions(elapsed, break_minutes, open_break_minutes, &settings);

        let mut created = Vec::with_capacity(conditions.len());
        for condition in conditions {
            let alert = ComplianceAlert {
                id: Uuid::new_v4(),
                employee_id: employee_id.to_string(),
                alert_type: condition.alert_type,
                severity: condition.severity,
                message: condition.message,
                is_active: true,
                created_at: now,
            };
            match self.compliance.create_alert(alert) {
                Ok(alert) => created.push(alert),
                Err(err) => {
                    warn!(
                        employee_id = %employee_id,
                        alert_type = ?condition.alert_type,
                        error = %err,
                        "failed to create compliance alert"
                    );
                }
            }
        }
        Ok(created)
    }
}
