//! Time entry state machine and derived status views.
//!
//! The state machine owns the clock-in → break → clock-out transitions and
//! all duration derivation. It reads and writes through the [`crate::store`]
//! traits and relies on the store to make the uniqueness invariants hold
//! under concurrent requests.

mod patch;
mod state_machine;
mod status;

pub use patch::Patch;
pub use state_machine::{BreakSpec, EntryPatch, TimeTrackingService};
pub use status::derive_status;
