//! HTTP client for the Square API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::config::SquareConfig;
use crate::types::{Customer, Invoice, InvoiceDraft, Order, OrderLineItem};

/// API version pinned for every request.
const SQUARE_VERSION: &str = "2024-01-18";

/// Square call failures.
#[derive(Debug, Error)]
pub enum SquareError {
    /// Non-success response; the provider's error body is preserved.
    #[error("square returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("square request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// The billing operations the orchestrator needs.
///
/// Mirrors Square's surface one call per method so tests can substitute an
/// in-memory double and count exactly which calls happened.
#[async_trait]
pub trait BillingApi: Send + Sync {
    /// Exact-email customer search.
    async fn search_customers_by_email(&self, email: &str) -> Result<Vec<Customer>, SquareError>;

    async fn create_customer(&self, given_name: &str, email: &str)
    -> Result<Customer, SquareError>;

    async fn create_order(
        &self,
        customer_id: &str,
        line_items: Vec<OrderLineItem>,
    ) -> Result<Order, SquareError>;

    /// Create a draft invoice. `idempotency_key` makes the create safe to
    /// re-send.
    async fn create_invoice(
        &self,
        draft: &InvoiceDraft,
        idempotency_key: &str,
    ) -> Result<Invoice, SquareError>;

    async fn publish_invoice(&self, invoice_id: &str, version: i64)
    -> Result<Invoice, SquareError>;

    /// Fetch an invoice; a provider 404 becomes `None`.
    async fn get_invoice(&self, invoice_id: &str) -> Result<Option<Invoice>, SquareError>;
}

#[derive(Debug, Deserialize)]
struct SearchCustomersResponse {
    #[serde(default)]
    customers: Option<Vec<Customer>>,
}

#[derive(Debug, Deserialize)]
struct CustomerResponse {
    customer: Customer,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    order: Order,
}

#[derive(Debug, Deserialize)]
struct InvoiceResponse {
    invoice: Invoice,
}

/// Production client over the shared HTTP connection pool.
#[derive(Debug, Clone)]
pub struct SquareClient {
    http: reqwest::Client,
    config: SquareConfig,
}

impl SquareClient {
    pub fn new(http: reqwest::Client, config: SquareConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &SquareConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.environment.api_base_url(), path)
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, SquareError> {
        let response = request
            .bearer_auth(&self.config.access_token)
            .header("Square-Version", SQUARE_VERSION)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SquareError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn post(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Result<reqwest::Response, SquareError> {
        self.execute(self.http.post(self.url(path)).json(&body)).await
    }
}

#[async_trait]
impl BillingApi for SquareClient {
    async fn search_customers_by_email(&self, email: &str) -> Result<Vec<Customer>, SquareError> {
        let body = json!({
            "query": {"filter": {"email_address": {"exact": email}}}
        });
        let response = self.post("/v2/customers/search", body).await?;
        let parsed: SearchCustomersResponse = response.json().await?;
        Ok(parsed.customers.unwrap_or_default())
    }

    async fn create_customer(
        &self,
        given_name: &str,
        email: &str,
    ) -> Result<Customer, SquareError> {
        let body = json!({
            "given_name": given_name,
            "email_address": email,
        });
        let response = self.post("/v2/customers", body).await?;
        let parsed: CustomerResponse = response.json().await?;
        Ok(parsed.customer)
    }

    async fn create_order(
        &self,
        customer_id: &str,
        line_items: Vec<OrderLineItem>,
    ) -> Result<Order, SquareError> {
        let body = json!({
            "order": {
                "location_id": self.config.location_id,
                "customer_id": customer_id,
                "line_items": line_items,
            }
        });
        let response = self.post("/v2/orders", body).await?;
        let parsed: OrderResponse = response.json().await?;
        Ok(parsed.order)
    }

    async fn create_invoice(
        &self,
        draft: &InvoiceDraft,
        idempotency_key: &str,
    ) -> Result<Invoice, SquareError> {
        let body = json!({
            "invoice": {
                "location_id": self.config.location_id,
                "order_id": draft.order_id,
                "primary_recipient": {"customer_id": draft.customer_id},
                "payment_requests": [{
                    "request_type": "BALANCE",
                    "due_date": draft.due_date.to_string(),
                }],
                "delivery_method": "EMAIL",
                "title": draft.title,
                "description": draft.description,
            },
            "idempotency_key": idempotency_key,
        });
        let response = self.post("/v2/invoices", body).await?;
        let parsed: InvoiceResponse = response.json().await?;
        Ok(parsed.invoice)
    }

    async fn publish_invoice(
        &self,
        invoice_id: &str,
        version: i64,
    ) -> Result<Invoice, SquareError> {
        let body = json!({ "version": version });
        let response = self
            .post(&format!("/v2/invoices/{invoice_id}/publish"), body)
            .await?;
        let parsed: InvoiceResponse = response.json().await?;
        Ok(parsed.invoice)
    }

    async fn get_invoice(&self, invoice_id: &str) -> Result<Option<Invoice>, SquareError> {
        let request = self.http.get(self.url(&format!("/v2/invoices/{invoice_id}")));
        match self.execute(request).await {
            Ok(response) => {
                let parsed: InvoiceResponse = response.json().await?;
                Ok(Some(parsed.invoice))
            }
            Err(SquareError::Api { status: 404, .. }) => Ok(None),
            Err(other) => Err(other),
        }
    }
}
