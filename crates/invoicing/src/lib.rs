//! `bookwell-invoicing` — the invoice orchestration core.
//!
//! Turns billed appointments into sent Square invoices: resolve a billing
//! customer (search-or-create), create an order from appointment line items,
//! create and publish an invoice, then reflect the outcome back into the
//! record store. Every run journals its progress in a durable
//! [`WorkflowRecord`] so an interrupted flow can be resumed with the same
//! idempotency key instead of duplicating provider resources.

pub mod orchestrator;
pub mod resolve;
pub mod workflow;

pub use orchestrator::{
    BillingError, BulkInvoiceArgs, BulkInvoiceSent, InvoiceOrchestrator, InvoiceSent,
    InvoiceStatusView,
};
pub use resolve::{CustomerResolution, placeholder_email, resolve_customer};
pub use workflow::{
    RemoteWorkflowStore, WorkflowError, WorkflowRecord, WorkflowStage, WorkflowStore,
};
