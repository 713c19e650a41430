//! Compliance violation and alert store.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{ComplianceAlert, ComplianceViolation, ViolationStatus};

/// Persistence boundary for violation records and alerts.
///
/// `create_alert` owns the deduplication: it deactivates prior active alerts
/// of the same (employee, alert type) and inserts the new one in a single
/// atomic step, so concurrent triggers cannot leave two alerts of one type
/// simultaneously active.
pub trait ComplianceStore: Send + Sync {
    /// Persists an immutable violation record.
    fn record_violation(&self, violation: ComplianceViolation)
    -> EngineResult<ComplianceViolation>;

    /// Returns the employee's violations created in `[from, to]`, newest
    /// first.
    fn list_violations(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<ComplianceViolation>>;

    /// Marks a violation acknowledged.
    fn acknowledge_violation(&self, violation_id: Uuid) -> EngineResult<ComplianceViolation>;

    /// Deactivates same-type active alerts for the employee and inserts the
    /// new alert, atomically.
    fn create_alert(&self, alert: ComplianceAlert) -> EngineResult<ComplianceAlert>;

    /// Returns the employee's active alerts, newest first.
    fn active_alerts(&self, employee_id: &str) -> EngineResult<Vec<ComplianceAlert>>;

    /// Dismisses an alert (sets it inactive).
    fn dismiss_alert(&self, alert_id: Uuid) -> EngineResult<ComplianceAlert>;
}

#[derive(Default)]
struct State {
    violations: HashMap<Uuid, ComplianceViolation>,
    alerts: HashMap<Uuid, ComplianceAlert>,
}

/// In-memory [`ComplianceStore`] backing the API wiring and the tests.
#[derive(Default)]
pub struct InMemoryComplianceStore {
    inner: RwLock<State>,
}

fn poisoned<T>(_: T) -> EngineError {
    EngineError::StoreError {
        message: "compliance store lock poisoned".to_string(),
    }
}

impl InMemoryComplianceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ComplianceStore for InMemoryComplianceStore {
    fn record_violation(
        &self,
        violation: ComplianceViolation,
    ) -> EngineResult<ComplianceViolation> {
        let mut state = self.inner.write().map_err(poisoned)?;
        state.violations.insert(violation.id, violation.clone());
        Ok(violation)
    }

    fn list_violations(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<ComplianceViolation>> {
        let state = self.inner.read().map_err(poisoned)?;
        let mut result: Vec<ComplianceViolation> = state
            .violations
            .values()
            .filter(|v| {
                v.employee_id == employee_id
                    && v.created_at.date() >= from
                    && v.created_at.date() <= to
            })
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    fn acknowledge_violation(&self, violation_id: Uuid) -> EngineResult<ComplianceViolation> {
        let mut state = self.inner.write().map_err(poisoned)?;
        let violation =
            state
                .violations
                .get_mut(&violation_id)
                .ok_or(EngineError::ViolationNotFound { violation_id })?;
        violation.status = ViolationStatus::Acknowledged;
        Ok(violation.clone())
    }

    fn create_alert(&self, alert: ComplianceAlert) -> EngineResult<ComplianceAlert> {
        let mut state = self.inner.write().map_err(poisoned)?;
        for existing in state.alerts.values_mut() {
            if existing.employee_id == alert.employee_id
                && existing.alert_type == alert.alert_type
                && existing.is_active
            {
                existing.is_active = false;
            }
        }
        state.alerts.insert(alert.id, alert.clone());
        Ok(alert)
    }

    fn active_alerts(&self, employee_id: &str) -> EngineResult<Vec<ComplianceAlert>> {
        let state = self.inner.read().map_err(poisoned)?;
        let mut result: Vec<ComplianceAlert> = state
            .alerts
            .values()
            .filter(|a| a.employee_id == employee_id && a.is_active)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    fn dismiss_alert(&self, alert_id: Uuid) -> EngineResult<ComplianceAlert> {
        let mut state = self.inner.write().map_err(poisoned)?;
        let alert = state
            .alerts
            .get_mut(&alert_id)
            .ok_or(EngineError::AlertNotFound { alert_id })?;
        alert.is_active = false;
        Ok(alert.clone())
    }
}
