//! Durable invoice-workflow journal.
//!
//! The orchestration spans three external systems with no shared
//! transaction, so every run writes its progress to a workflow record in the
//! record store. The record carries everything needed to re-enter the flow:
//! the resolved billing context, the ids handed out so far, and the
//! idempotency key for the invoice create. Stages only move forward.

use async_trait::async_trait;
use bookwell_core::{AppointmentId, WorkflowId};
use bookwell_datastore::{DataStoreClient, DataStoreError, Insert, Query, Update};
use bookwell_square::OrderLineItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Where a workflow has gotten to, with the provider ids collected so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum WorkflowStage {
    Pending,
    CustomerResolved {
        customer_id: String,
    },
    OrderCreated {
        customer_id: String,
        order_id: String,
    },
    InvoiceCreated {
        customer_id: String,
        order_id: String,
        invoice_id: String,
        invoice_version: i64,
    },
    Published {
        invoice_id: String,
    },
    Reconciled {
        invoice_id: String,
    },
}

impl WorkflowStage {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowStage::Pending => "pending",
            WorkflowStage::CustomerResolved { .. } => "customer_resolved",
            WorkflowStage::OrderCreated { .. } => "order_created",
            WorkflowStage::InvoiceCreated { .. } => "invoice_created",
            WorkflowStage::Published { .. } => "published",
            WorkflowStage::Reconciled { .. } => "reconciled",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("invalid workflow transition: {from} -> {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
}

/// One invoice run's durable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRecord {
    pub id: WorkflowId,

    /// Stable for the record's lifetime; a resumed run re-sends the same
    /// invoice create instead of minting a duplicate.
    pub idempotency_key: String,

    /// The appointments this run bills. Only these flip to `billed`.
    pub appointment_ids: Vec<AppointmentId>,

    pub customer_name: String,
    pub customer_email: String,
    pub invoice_title: String,
    pub invoice_description: String,
    pub line_items: Vec<OrderLineItem>,

    /// Local invoice record to flip to `sent`, when the caller tracks one.
    #[serde(default)]
    pub invoice_record_id: Option<String>,

    #[serde(flatten)]
    pub stage: WorkflowStage,

    #[serde(default)]
    pub last_error: Option<String>,

    pub updated_at: DateTime<Utc>,
}

impl WorkflowRecord {
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// Record a failure without moving the stage; the record stays resumable
    /// from where it was.
    pub fn note_error(&mut self, message: impl Into<String>, now: DateTime<Utc>) {
        self.last_error = Some(message.into());
        self.touch(now);
    }

    pub fn customer_resolved(
        &mut self,
        customer_id: String,
        now: DateTime<Utc>,
    ) -> Result<(), WorkflowError> {
        match &self.stage {
            WorkflowStage::Pending => {
                self.stage = WorkflowStage::CustomerResolved { customer_id };
                self.last_error = None;
                self.touch(now);
                Ok(())
            }
            other => Err(WorkflowError::InvalidTransition {
                from: other.name(),
                to: "customer_resolved",
            }),
        }
    }

    pub fn order_created(
        &mut self,
        order_id: String,
        now: DateTime<Utc>,
    ) -> Result<(), WorkflowError> {
        match &self.stage {
            WorkflowStage::CustomerResolved { customer_id } => {
                self.stage = WorkflowStage::OrderCreated {
                    customer_id: customer_id.clone(),
                    order_id,
                };
                self.last_error = None;
                self.touch(now);
                Ok(())
            }
            other => Err(WorkflowError::InvalidTransition {
                from: other.name(),
                to: "order_created",
            }),
        }
    }

    pub fn invoice_created(
        &mut self,
        invoice_id: String,
        invoice_version: i64,
        now: DateTime<Utc>,
    ) -> Result<(), WorkflowError> {
        match &self.stage {
            WorkflowStage::OrderCreated {
                customer_id,
                order_id,
            } => {
                self.stage = WorkflowStage::InvoiceCreated {
                    customer_id: customer_id.clone(),
                    order_id: order_id.clone(),
                    invoice_id,
                    invoice_version,
                };
                self.last_error = None;
                self.touch(now);
                Ok(())
            }
            other => Err(WorkflowError::InvalidTransition {
                from: other.name(),
                to: "invoice_created",
            }),
        }
    }

    pub fn published(&mut self, now: DateTime<Utc>) -> Result<(), WorkflowError> {
        match &self.stage {
            WorkflowStage::InvoiceCreated { invoice_id, .. } => {
                self.stage = WorkflowStage::Published {
                    invoice_id: invoice_id.clone(),
                };
                self.last_error = None;
                self.touch(now);
                Ok(())
            }
            other => Err(WorkflowError::InvalidTransition {
                from: other.name(),
                to: "published",
            }),
        }
    }

    pub fn reconciled(&mut self, now: DateTime<Utc>) -> Result<(), WorkflowError> {
        match &self.stage {
            WorkflowStage::Published { invoice_id } => {
                self.stage = WorkflowStage::Reconciled {
                    invoice_id: invoice_id.clone(),
                };
                self.last_error = None;
                self.touch(now);
                Ok(())
            }
            other => Err(WorkflowError::InvalidTransition {
                from: other.name(),
                to: "reconciled",
            }),
        }
    }
}

/// Persistence seam for workflow records.
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Persist a brand-new record.
    async fn create(&self, record: &WorkflowRecord) -> Result<(), DataStoreError>;

    /// Persist the current state of an existing record.
    async fn save(&self, record: &WorkflowRecord) -> Result<(), DataStoreError>;

    async fn load(&self, id: WorkflowId) -> Result<Option<WorkflowRecord>, DataStoreError>;
}

const WORKFLOWS_TABLE: &str = "invoice_workflows";

/// Workflow journal kept in the remote record store, alongside the data it
/// protects.
#[derive(Debug, Clone)]
pub struct RemoteWorkflowStore {
    data: DataStoreClient,
}

impl RemoteWorkflowStore {
    pub fn new(data: DataStoreClient) -> Self {
        Self { data }
    }
}

#[async_trait]
impl WorkflowStore for RemoteWorkflowStore {
    async fn create(&self, record: &WorkflowRecord) -> Result<(), DataStoreError> {
        let row = serde_json::to_value(record)?;
        self.data.insert(&Insert::new(WORKFLOWS_TABLE, row)).await
    }

    async fn save(&self, record: &WorkflowRecord) -> Result<(), DataStoreError> {
        let row = serde_json::to_value(record)?;
        let update = Update::table(WORKFLOWS_TABLE, row).eq("id", record.id.to_string());
        self.data.update(&update).await
    }

    async fn load(&self, id: WorkflowId) -> Result<Option<WorkflowRecord>, DataStoreError> {
        self.data
            .first_as(&Query::table(WORKFLOWS_TABLE).eq("id", id.to_string()))
            .await
    }
}

/// Fresh key for a new workflow record.
pub(crate) fn new_idempotency_key() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> WorkflowRecord {
        WorkflowRecord {
            id: WorkflowId::new(),
            idempotency_key: new_idempotency_key(),
            appointment_ids: vec![AppointmentId::new(1)],
            customer_name: "Ada Lovelace".to_string(),
            customer_email: "ada@example.org".to_string(),
            invoice_title: "Invoice for Checkup".to_string(),
            invoice_description: "Thank you for your appointment.".to_string(),
            line_items: vec![OrderLineItem::single("Checkup", 1250)],
            invoice_record_id: None,
            stage: WorkflowStage::Pending,
            last_error: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn stages_only_move_forward() {
        let now = Utc::now();
        let mut wf = record();

        wf.customer_resolved("cus-1".to_string(), now).unwrap();
        wf.order_created("ord-1".to_string(), now).unwrap();
        wf.invoice_created("inv-1".to_string(), 1, now).unwrap();
        wf.published(now).unwrap();
        wf.reconciled(now).unwrap();

        assert_eq!(
            wf.stage,
            WorkflowStage::Reconciled {
                invoice_id: "inv-1".to_string()
            }
        );
    }

    #[test]
    fn skipping_a_stage_is_rejected() {
        let now = Utc::now();
        let mut wf = record();

        let err = wf.order_created("ord-1".to_string(), now).unwrap_err();
        assert_eq!(
            err,
            WorkflowError::InvalidTransition {
                from: "pending",
                to: "order_created",
            }
        );

        // Completed records refuse to restart.
        wf.customer_resolved("cus-1".to_string(), now).unwrap();
        let err = wf.customer_resolved("cus-2".to_string(), now).unwrap_err();
        assert_eq!(
            err,
            WorkflowError::InvalidTransition {
                from: "customer_resolved",
                to: "customer_resolved",
            }
        );
    }

    #[test]
    fn noting_an_error_keeps_the_stage() {
        let now = Utc::now();
        let mut wf = record();
        wf.customer_resolved("cus-1".to_string(), now).unwrap();

        wf.note_error("publish blew up", now);
        assert_eq!(wf.stage.name(), "customer_resolved");
        assert_eq!(wf.last_error.as_deref(), Some("publish blew up"));
    }

    #[test]
    fn record_round_trips_through_store_json() {
        let mut wf = record();
        wf.customer_resolved("cus-1".to_string(), Utc::now()).unwrap();
        wf.order_created("ord-9".to_string(), Utc::now()).unwrap();

        let row = serde_json::to_value(&wf).unwrap();
        assert_eq!(row["stage"], "order_created");
        assert_eq!(row["orderId"], "ord-9");

        let back: WorkflowRecord = serde_json::from_value(row).unwrap();
        assert_eq!(back, wf);
    }
}
