//! In-memory clock store.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{TimeBreak, TimeEntry};

use super::clock::ClockStore;

#[derive(Default)]
struct State {
    employees: HashSet<String>,
    entries: HashMap<Uuid, TimeEntry>,
    breaks: HashMap<Uuid, TimeBreak>,
}

/// In-memory [`ClockStore`] backing the API wiring and the tests.
///
/// A single `RwLock` around the whole state makes every mutation atomic,
/// which is how the uniqueness invariants survive concurrent requests.
#[derive(Default)]
pub struct InMemoryClockStore {
    inner: RwLock<State>,
}

fn poisoned<T>(_: T) -> EngineError {
    EngineError::StoreError {
        message: "clock store lock poisoned".to_string(),
    }
}

impl InMemoryClockStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an employee id so clock operations accept it.
    pub fn register_employee(&self, employee_id: impl Into<String>) {
        if let Ok(mut state) = self.inner.write() {
            state.employees.insert(employee_id.into());
        }
    }
}

impl State {
    fn active_entry_for(&self, employee_id: &str) -> Option<&TimeEntry> {
        self.entries
            .values()
            .find(|e| e.employee_id == employee_id && e.clock_out.is_none() && !e.deleted)
    }

    fn active_break_for(&self, entry_id: Uuid) -> Option<&TimeBreak> {
        self.breaks
            .values()
            .find(|b| b.time_entry_id == entry_id && b.end_time.is_none())
    }
}

impl ClockStore for InMemoryClockStore {
    fn employee_exists(&self, employee_id: &str) -> EngineResult<bool> {
        let state = self.inner.read().map_err(poisoned)?;
        Ok(state.employees.contains(employee_id))
    }

    fn get_active_entry(&self, employee_id: &str) -> EngineResult<Option<TimeEntry>> {
        let state = self.inner.read().map_err(poisoned)?;
        Ok(state.active_entry_for(employee_id).cloned())
    }

    fn get_entry(&self, entry_id: Uuid) -> EngineResult<Option<TimeEntry>> {
        let state = self.inner.read().map_err(poisoned)?;
        Ok(state.entries.get(&entry_id).filter(|e| !e.deleted).cloned())
    }

    fn create_entry(&self, entry: TimeEntry) -> EngineResult<TimeEntry> {
        let mut state = self.inner.write().map_err(poisoned)?;
        if entry.clock_out.is_none() && state.active_entry_for(&entry.employee_id).is_some() {
            return Err(EngineError::ActiveEntryExists {
                employee_id: entry.employee_id,
            });
        }
        state.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    fn update_entry(&self, entry: TimeEntry) -> EngineResult<TimeEntry> {
        let mut state = self.inner.write().map_err(poisoned)?;
        if !state.entries.contains_key(&entry.id) {
            return Err(EngineError::EntryNotFound { entry_id: entry.id });
        }
        // Reopening must not produce a second open entry for the employee.
        if entry.clock_out.is_none() && !entry.deleted {
            if let Some(other) = state.active_entry_for(&entry.employee_id) {
                if other.id != entry.id {
                    return Err(EngineError::ActiveEntryExists {
                        employee_id: entry.employee_id,
                    });
                }
            }
        }
        state.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    fn get_active_break(&self, entry_id: Uuid) -> EngineResult<Option<TimeBreak>> {
        let state = self.inner.read().map_err(poisoned)?;
        Ok(state.active_break_for(entry_id).cloned())
    }

    fn create_break(&self, brk: TimeBreak) -> EngineResult<TimeBreak> {
        let mut state = self.inner.write().map_err(poisoned)?;
        let entry = state
            .entries
            .get(&brk.time_entry_id)
            .filter(|e| !e.deleted)
            .ok_or(EngineError::EntryNotFound {
                entry_id: brk.time_entry_id,
            })?;
        let employee_id = entry.employee_id.clone();
        if brk.end_time.is_none() && state.active_break_for(brk.time_entry_id).is_some() {
            return Err(EngineError::BreakAlreadyActive { employee_id });
        }
        state.breaks.insert(brk.id, brk.clone());
        Ok(brk)
    }

    fn update_break(&self, brk: TimeBreak) -> EngineResult<TimeBreak> {
        let mut state = self.inner.write().map_err(poisoned)?;
        if !state.breaks.contains_key(&brk.id) {
            return Err(EngineError::BreakNotFound { break_id: brk.id });
        }
        state.breaks.insert(brk.id, brk.clone());
        Ok(brk)
    }

    fn list_breaks(&self, entry_id: Uuid) -> EngineResult<Vec<TimeBreak>> {
        let state = self.inner.read().map_err(poisoned)?;
        let mut breaks: Vec<TimeBreak> = state
            .breaks
            .values()
            .filter(|b| b.time_entry_id == entry_id)
            .cloned()
            .collect();
        breaks.sort_by_key(|b| b.start_time);
        Ok(breaks)
    }

    fn replace_breaks(
        &self,
        entry_id: Uuid,
        breaks: Vec<TimeBreak>,
    ) -> EngineResult<Vec<TimeBreak>> {
        let mut state = self.inner.write().map_err(poisoned)?;
        let entry = state
            .entries
            .get(&entry_id)
            .filter(|e| !e.deleted)
            .ok_or(EngineError::EntryNotFound { entry_id })?;
        let employee_id = entry.employee_id.clone();
        if breaks.iter().filter(|b| b.end_time.is_none()).count() > 1 {
            return Err(EngineError::BreakAlreadyActive { employee_id });
        }
        state.breaks.retain(|_, b| b.time_entry_id != entry_id);
        let mut stored = Vec::with_capacity(breaks.len());
        for mut brk in breaks {
            brk.time_entry_id = entry_id;
            state.breaks.insert(brk.id, brk.clone());
            stored.push(brk);
        }
        stored.sort_by_key(|b| b.start_time);
        Ok(stored)
    }

    fn sum_break_minutes(&self, entry_id: Uuid, now: NaiveDateTime) -> EngineResult<i64> {
        let state = self.inner.read().map_err(poisoned)?;
        Ok(state
            .breaks
            .values()
            .filter(|b| b.time_entry_id == entry_id)
            .map(|b| b.duration_minutes(now))
            .sum())
    }

    fn list_entries(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<TimeEntry>> {
        let state = self.inner.read().map_err(poisoned)?;
        let mut entries: Vec<TimeEntry> = state
            .entries
            .values()
            .filter(|e| {
                e.employee_id == employee_id
                    && !e.deleted
                    && e.entry_date >= from
                    && e.entry_date <= to
            })
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.clock_in);
        Ok(entries)
    }
}
