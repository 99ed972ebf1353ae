//! `bookwell-scheduling` — appointment and client records.
//!
//! Typed views over the rows the remote store keeps for the booking product,
//! plus the [`SchedulingStore`] port the invoice orchestrator reads and
//! writes through.

pub mod records;
pub mod store;

pub use records::{Appointment, BillingStatus, ClientRecord};
pub use store::{RemoteSchedulingStore, SchedulingStore};
