//! `bookwell-square` — client for the Square customer/order/invoice API.
//!
//! Thin typed wrapper over the handful of Square endpoints the gateway
//! drives: customer search/create, order create, invoice create/publish/get.
//! The [`BillingApi`] trait is the seam the orchestrator works against;
//! [`SquareClient`] is the production implementation.

pub mod client;
pub mod config;
pub mod types;

pub use client::{BillingApi, SquareClient, SquareError};
pub use config::{SquareConfig, SquareEnvironment};
pub use types::{Customer, Invoice, InvoiceDraft, Money, Order, OrderLineItem, PaymentRequest};
