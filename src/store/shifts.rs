//! Shift store collaborator interface.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::ShiftAssignment;

/// Persistence boundary for scheduled shifts.
///
/// Shift-template CRUD lives elsewhere; the engine only needs to read an
/// employee's assignments (with resolvable absolute timestamps) and, for
/// test wiring, to create them.
pub trait ShiftStore: Send + Sync {
    /// Returns the employee's shifts whose `shift_date` lies in
    /// `[from, to]`, ordered by resolved start.
    fn list_shifts(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<ShiftAssignment>>;

    /// Persists a new shift assignment.
    fn create_shift(&self, shift: ShiftAssignment) -> EngineResult<ShiftAssignment>;
}

/// In-memory [`ShiftStore`] backing the API wiring and the tests.
#[derive(Default)]
pub struct InMemoryShiftStore {
    inner: RwLock<HashMap<Uuid, ShiftAssignment>>,
}

impl InMemoryShiftStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ShiftStore for InMemoryShiftStore {
    fn list_shifts(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<ShiftAssignment>> {
        let shifts = self.inner.read().map_err(|_| EngineError::StoreError {
            message: "shift store lock poisoned".to_string(),
        })?;
        let mut result: Vec<ShiftAssignment> = shifts
            .values()
            .filter(|s| s.employee_id == employee_id && s.shift_date >= from && s.shift_date <= to)
            .cloned()
            .collect();
        result.sort_by_key(ShiftAssignment::resolved_start);
        Ok(result)
    }

    fn create_shift(&self, shift: ShiftAssignment) -> EngineResult<ShiftAssignment> {
        let mut shifts = self.inner.write().map_err(|_| EngineError::StoreError {
            message: "shift store lock poisoned".to_string(),
        })?;
        shifts.insert(shift.id, shift.clone());
        Ok(shift)
    }
}
