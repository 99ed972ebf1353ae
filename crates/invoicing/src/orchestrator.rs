//! The invoice orchestration flows.

use bookwell_core::{AppointmentId, WorkflowId, to_minor_units};
use bookwell_datastore::DataStoreError;
use bookwell_scheduling::{Appointment, SchedulingStore};
use bookwell_square::{BillingApi, InvoiceDraft, OrderLineItem, SquareEnvironment, SquareError};
use chrono::{Duration, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::resolve::{placeholder_email, resolve_customer};
use crate::workflow::{WorkflowError, WorkflowRecord, WorkflowStage, WorkflowStore, new_idempotency_key};

/// Orchestration failures, mapped onto HTTP statuses by the API layer.
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("appointment not found")]
    AppointmentNotFound(AppointmentId),

    #[error("client must have an email")]
    ClientEmailMissing,

    #[error("no valid appointments found")]
    NoValidAppointments,

    #[error("invoice not found")]
    InvoiceNotFound(String),

    #[error("invoice publish failed")]
    PublishFailed(String),

    #[error("workflow not found")]
    WorkflowNotFound(WorkflowId),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Store(#[from] DataStoreError),

    #[error(transparent)]
    Provider(#[from] SquareError),
}

/// Result of the single-appointment flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceSent {
    pub invoice_id: String,
}

/// Result of the bulk flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkInvoiceSent {
    pub invoice_id: String,
    pub dashboard_url: String,
}

/// Current provider-side state of an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceStatusView {
    pub status: String,
    pub first_payment_amount: i64,
}

/// Input of the bulk flow, straight from the request body.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkInvoiceArgs {
    pub appointment_ids: Vec<AppointmentId>,
    pub client_name: String,
    /// Caller-supplied aggregate; advisory only. The order total is always
    /// the line-item sum.
    pub amount: f64,
    pub invoice_record_id: Option<String>,
}

/// Drives appointments through customer → order → invoice → publish.
///
/// Generic over its three ports so the flows run against in-memory doubles
/// in tests. Nothing here retries, and nothing compensates: a failed step
/// leaves the journal at the last completed stage for a later resume.
pub struct InvoiceOrchestrator<S, B, W> {
    scheduling: S,
    billing: B,
    workflows: W,
    environment: SquareEnvironment,
}

impl<S, B, W> InvoiceOrchestrator<S, B, W>
where
    S: SchedulingStore,
    B: BillingApi,
    W: WorkflowStore,
{
    pub fn new(scheduling: S, billing: B, workflows: W, environment: SquareEnvironment) -> Self {
        Self {
            scheduling,
            billing,
            workflows,
            environment,
        }
    }

    /// Invoice a single appointment and send it to the client.
    pub async fn send_invoice(
        &self,
        appointment_id: AppointmentId,
    ) -> Result<InvoiceSent, BillingError> {
        let appointment = self
            .scheduling
            .appointment(appointment_id)
            .await?
            .ok_or(BillingError::AppointmentNotFound(appointment_id))?;

        let client_name = appointment
            .client_name
            .clone()
            .ok_or(BillingError::ClientEmailMissing)?;
        let client = self
            .scheduling
            .client_by_name(&client_name)
            .await?
            .ok_or(BillingError::ClientEmailMissing)?;
        let email = client
            .billable_email()
            .ok_or(BillingError::ClientEmailMissing)?
            .to_string();

        let title = appointment.line_title().to_string();
        let mut record = WorkflowRecord {
            id: WorkflowId::new(),
            idempotency_key: new_idempotency_key(),
            appointment_ids: vec![appointment.id],
            customer_name: client.name.clone(),
            customer_email: email,
            invoice_title: format!("Invoice for {title}"),
            invoice_description: "Thank you for your appointment.".to_string(),
            line_items: vec![line_item(&appointment)],
            invoice_record_id: None,
            stage: WorkflowStage::Pending,
            last_error: None,
            updated_at: Utc::now(),
        };
        self.workflows.create(&record).await?;

        let invoice_id = self.run_to_completion(&mut record).await?;
        Ok(InvoiceSent { invoice_id })
    }

    /// Invoice a batch of appointments as one order. Unresolvable ids are
    /// skipped, not fatal; an empty batch is.
    pub async fn send_bulk_invoice(
        &self,
        args: BulkInvoiceArgs,
    ) -> Result<BulkInvoiceSent, BillingError> {
        let mut appointments: Vec<Appointment> = Vec::new();
        let mut client_email: Option<String> = None;

        for id in &args.appointment_ids {
            let Some(appointment) = self.scheduling.appointment(*id).await? else {
                tracing::warn!(appointment_id = %id, "skipping unknown appointment in bulk invoice");
                continue;
            };

            if client_email.is_none() {
                if let Some(name) = appointment.client_name.as_deref() {
                    if let Some(client) = self.scheduling.client_by_name(name).await? {
                        client_email = client.billable_email().map(str::to_string);
                    }
                }
            }
            appointments.push(appointment);
        }

        if appointments.is_empty() {
            return Err(BillingError::NoValidAppointments);
        }

        let email = client_email.unwrap_or_else(|| placeholder_email(&args.client_name));
        let line_items: Vec<OrderLineItem> = appointments.iter().map(line_item).collect();

        let computed_total: i64 = line_items.iter().map(|l| l.base_price_money.amount).sum();
        let requested_total = to_minor_units(args.amount);
        if requested_total != computed_total {
            tracing::warn!(
                requested_total,
                computed_total,
                "bulk invoice amount differs from line-item sum; billing the computed total"
            );
        }

        let mut record = WorkflowRecord {
            id: WorkflowId::new(),
            idempotency_key: new_idempotency_key(),
            appointment_ids: appointments.iter().map(|a| a.id).collect(),
            customer_name: args.client_name.clone(),
            customer_email: email,
            invoice_title: format!("Invoice for {}", args.client_name),
            invoice_description: format!("Invoice for {} appointments", appointments.len()),
            line_items,
            invoice_record_id: args.invoice_record_id,
            stage: WorkflowStage::Pending,
            last_error: None,
            updated_at: Utc::now(),
        };
        self.workflows.create(&record).await?;

        let invoice_id = self.run_to_completion(&mut record).await?;
        let dashboard_url = self.environment.dashboard_invoice_url(&invoice_id);
        Ok(BulkInvoiceSent {
            invoice_id,
            dashboard_url,
        })
    }

    /// Re-enter an interrupted workflow at its recorded stage, reusing the
    /// journaled context and idempotency key.
    pub async fn resume_workflow(&self, id: WorkflowId) -> Result<String, BillingError> {
        let mut record = self
            .workflows
            .load(id)
            .await?
            .ok_or(BillingError::WorkflowNotFound(id))?;
        self.run_to_completion(&mut record).await
    }

    /// Provider-side status of an invoice.
    pub async fn invoice_status(&self, invoice_id: &str) -> Result<InvoiceStatusView, BillingError> {
        let invoice = self
            .billing
            .get_invoice(invoice_id)
            .await?
            .ok_or_else(|| BillingError::InvoiceNotFound(invoice_id.to_string()))?;

        Ok(InvoiceStatusView {
            first_payment_amount: invoice.first_payment_amount(),
            status: invoice.status.unwrap_or_default(),
        })
    }

    /// Advance a workflow stage by stage until it is reconciled.
    ///
    /// Each completed step is journaled before the next begins. A publish
    /// failure is reported as such and leaves the record at
    /// `invoice_created`; appointments stay untouched until after a
    /// successful publish.
    async fn run_to_completion(&self, record: &mut WorkflowRecord) -> Result<String, BillingError> {
        loop {
            match record.stage.clone() {
                WorkflowStage::Pending => {
                    let resolution = resolve_customer(
                        &self.billing,
                        &record.customer_name,
                        &record.customer_email,
                    )
                    .await?;
                    tracing::info!(
                        workflow = %record.id,
                        customer_id = resolution.customer_id(),
                        "billing customer resolved"
                    );
                    record.customer_resolved(resolution.into_customer_id(), Utc::now())?;
                    self.workflows.save(record).await?;
                }

                WorkflowStage::CustomerResolved { customer_id } => {
                    let order = self
                        .billing
                        .create_order(&customer_id, record.line_items.clone())
                        .await?;
                    record.order_created(order.id, Utc::now())?;
                    self.workflows.save(record).await?;
                }

                WorkflowStage::OrderCreated {
                    customer_id,
                    order_id,
                } => {
                    let draft = InvoiceDraft {
                        order_id,
                        customer_id,
                        title: record.invoice_title.clone(),
                        description: record.invoice_description.clone(),
                        due_date: Utc::now().date_naive() + Duration::days(7),
                    };
                    let invoice = self
                        .billing
                        .create_invoice(&draft, &record.idempotency_key)
                        .await?;
                    record.invoice_created(invoice.id, invoice.version, Utc::now())?;
                    self.workflows.save(record).await?;
                }

                WorkflowStage::InvoiceCreated {
                    invoice_id,
                    invoice_version,
                    ..
                } => match self.billing.publish_invoice(&invoice_id, invoice_version).await {
                    Ok(_) => {
                        record.published(Utc::now())?;
                        self.workflows.save(record).await?;
                    }
                    Err(err) => {
                        let message = err.to_string();
                        record.note_error(&message, Utc::now());
                        if let Err(save_err) = self.workflows.save(record).await {
                            tracing::error!(
                                workflow = %record.id,
                                error = %save_err,
                                "failed to journal publish failure"
                            );
                        }
                        return Err(BillingError::PublishFailed(message));
                    }
                },

                WorkflowStage::Published { invoice_id } => {
                    for id in record.appointment_ids.clone() {
                        self.scheduling.mark_billed(id).await?;
                    }
                    if let Some(record_id) = record.invoice_record_id.clone() {
                        let url = self.environment.dashboard_invoice_url(&invoice_id);
                        self.scheduling
                            .mark_invoice_sent(&record_id, &invoice_id, &url, Utc::now())
                            .await?;
                    }
                    record.reconciled(Utc::now())?;
                    self.workflows.save(record).await?;
                }

                WorkflowStage::Reconciled { invoice_id } => return Ok(invoice_id),
            }
        }
    }
}

fn line_item(appointment: &Appointment) -> OrderLineItem {
    OrderLineItem::single(
        appointment.line_title(),
        to_minor_units(appointment.price_or_zero()),
    )
}
