//! HTTP API for the Time-Tracking & Compliance Engine.
//!
//! This module provides the axum router, request/response types, and
//! application state for the engine's HTTP surface.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BreakItemRequest, ClockActionRequest, EntryPatchRequest, ManualClockInRequest,
    ManualClockOutRequest, ReplaceBreaksRequest, SettingsUpdateRequest, ShiftValidationRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
