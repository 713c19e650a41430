//! Application state for the Time-Tracking & Compliance Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::compliance::{AlertRecorder, ShiftValidator};
use crate::config::SettingsStore;
use crate::events::EventSink;
use crate::store::{ClockStore, ComplianceStore, ShiftStore};
use crate::tracking::TimeTrackingService;

/// Shared application state.
///
/// Wires the state machine, the alert recorder, and the shift validator
/// over one set of collaborator stores.
#[derive(Clone)]
pub struct AppState {
    tracking: Arc<TimeTrackingService>,
    alerts: Arc<AlertRecorder>,
    shift_validator: Arc<ShiftValidator>,
    settings: Arc<dyn SettingsStore>,
    compliance: Arc<dyn ComplianceStore>,
}

impl AppState {
    /// Creates the application state over the given collaborators.
    pub fn new(
        clock: Arc<dyn ClockStore>,
        shifts: Arc<dyn ShiftStore>,
        compliance: Arc<dyn ComplianceStore>,
        settings: Arc<dyn SettingsStore>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        let tracking = Arc::new(TimeTrackingService::new(
            clock.clone(),
            compliance.clone(),
            settings.clone(),
            events,
        ));
        let alerts = Arc::new(AlertRecorder::new(
            clock.clone(),
            compliance.clone(),
            settings.clone(),
        ));
        let shift_validator = Arc::new(ShiftValidator::new(clock, shifts, settings.clone()));
        Self {
            tracking,
            alerts,
            shift_validator,
            settings,
            compliance,
        }
    }

    /// Returns the time entry state machine.
    pub fn tracking(&self) -> &TimeTrackingService {
        &self.tracking
    }

    /// Returns the alert recorder.
    pub fn alerts(&self) -> &AlertRecorder {
        &self.alerts
    }

    /// Returns the shift validator.
    pub fn shift_validator(&self) -> &ShiftValidator {
        &self.shift_validator
    }

    /// Returns the settings store.
    pub fn settings(&self) -> &Arc<dyn SettingsStore> {
        &self.settings
    }

    /// Returns the compliance record store.
    pub fn compliance(&self) -> &Arc<dyn ComplianceStore> {
        &self.compliance
    }
}
