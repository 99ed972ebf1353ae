//! Store port for scheduling records.

use async_trait::async_trait;
use bookwell_core::AppointmentId;
use bookwell_datastore::{DataStoreClient, DataStoreError, Query, Update};
use chrono::{DateTime, Utc};
use serde_json::json;

use crate::records::{Appointment, ClientRecord};

/// Read/write access to the scheduling tables.
///
/// The orchestrator depends on this seam so its flows can run against an
/// in-memory double in tests.
#[async_trait]
pub trait SchedulingStore: Send + Sync {
    async fn appointment(&self, id: AppointmentId) -> Result<Option<Appointment>, DataStoreError>;

    async fn client_by_name(&self, name: &str) -> Result<Option<ClientRecord>, DataStoreError>;

    /// Flip an appointment's billing status to `billed`.
    async fn mark_billed(&self, id: AppointmentId) -> Result<(), DataStoreError>;

    /// Mark a local invoice record as sent, linking the external invoice.
    async fn mark_invoice_sent(
        &self,
        record_id: &str,
        external_invoice_id: &str,
        external_invoice_url: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DataStoreError>;
}

/// Production implementation over the remote record store.
#[derive(Debug, Clone)]
pub struct RemoteSchedulingStore {
    data: DataStoreClient,
}

impl RemoteSchedulingStore {
    pub fn new(data: DataStoreClient) -> Self {
        Self { data }
    }
}

#[async_trait]
impl SchedulingStore for RemoteSchedulingStore {
    async fn appointment(&self, id: AppointmentId) -> Result<Option<Appointment>, DataStoreError> {
        self.data
            .first_as(&Query::table("appointments").eq("id", id.as_i64()))
            .await
    }

    async fn client_by_name(&self, name: &str) -> Result<Option<ClientRecord>, DataStoreError> {
        self.data
            .first_as(&Query::table("clients").eq("name", name))
            .await
    }

    async fn mark_billed(&self, id: AppointmentId) -> Result<(), DataStoreError> {
        let update = Update::table("appointments", json!({"billingStatus": "billed"}))
            .eq("id", id.as_i64());
        self.data.update(&update).await
    }

    async fn mark_invoice_sent(
        &self,
        record_id: &str,
        external_invoice_id: &str,
        external_invoice_url: &str,
        now: DateTime<Utc>,
    ) -> Result<(), DataStoreError> {
        let update = Update::table(
            "invoices",
            json!({
                "status": "sent",
                "squareInvoiceId": external_invoice_id,
                "squareInvoiceUrl": external_invoice_url,
                "updatedAt": now.to_rfc3339(),
            }),
        )
        .eq("id", record_id);
        self.data.update(&update).await
    }
}
