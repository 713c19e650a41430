//! Time-Tracking & Compliance Engine for staff operations
//!
//! This crate models the clock-in/break/clock-out lifecycle of employees,
//! derives work and break durations, and evaluates each session against the
//! limits of the German Working Hours Act (ArbZG) to produce violations,
//! alerts, and blocking decisions.

#![warn(missing_docs)]

pub mod api;
pub mod compliance;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod store;
pub mod tracking;
