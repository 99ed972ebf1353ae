//! `bookwell-core` — shared primitives for the gateway crates.
//!
//! This crate contains the pieces every other crate agrees on: strongly-typed
//! identifiers and the money conversion used when talking to the billing
//! provider. No infrastructure concerns live here.

pub mod id;
pub mod money;

pub use id::{AppointmentId, WorkflowId};
pub use money::to_minor_units;
