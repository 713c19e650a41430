//! Compliance rule evaluation, alerting, and shift validation.
//!
//! The evaluator in [`rules`] is pure; the recorder and the shift checker
//! combine it with store reads. Alerting is best-effort telemetry, never a
//! blocking gate.

mod alerts;
mod rules;
mod shift_check;

pub use alerts::AlertRecorder;
pub use rules::{
    BreakEndEligibility, Finding, NINE_HOUR_TIER_MINUTES, SIX_HOUR_TIER_MINUTES,
    check_break_segment, evaluate_break_end, evaluate_clock_out, required_break_minutes,
};
pub use shift_check::{ShiftRule, ShiftRuleIssue, ShiftValidation, ShiftValidator};
