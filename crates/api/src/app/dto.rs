use serde::Deserialize;

use bookwell_invoicing::{BulkInvoiceSent, InvoiceSent, InvoiceStatusView};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct InvoiceRequest {
    pub appointment_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkInvoiceRequest {
    /// Local invoice record to mark as sent, when the caller tracks one.
    #[serde(default)]
    pub invoice_id: Option<String>,
    pub appointment_ids: Vec<i64>,
    pub client_name: String,
    pub amount: f64,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn invoice_sent_to_json(sent: &InvoiceSent) -> serde_json::Value {
    serde_json::json!({
        "status": "Invoice Sent",
        "invoiceId": sent.invoice_id,
    })
}

pub fn bulk_invoice_sent_to_json(sent: &BulkInvoiceSent) -> serde_json::Value {
    serde_json::json!({
        "status": "Invoice Sent",
        "squareInvoiceId": sent.invoice_id,
        "squareInvoiceUrl": sent.dashboard_url,
    })
}

pub fn invoice_status_to_json(view: &InvoiceStatusView) -> serde_json::Value {
    serde_json::json!({
        "status": view.status,
        "paymentStatus": view.first_payment_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_request_decodes_the_client_wire_shape() {
        let req: BulkInvoiceRequest = serde_json::from_value(serde_json::json!({
            "invoiceId": "local-1",
            "appointmentIds": [1, 2, 3],
            "clientName": "Ada Lovelace",
            "amount": 42.5,
        }))
        .unwrap();

        assert_eq!(req.invoice_id.as_deref(), Some("local-1"));
        assert_eq!(req.appointment_ids, vec![1, 2, 3]);
        assert_eq!(req.amount, 42.5);

        // invoiceId is optional.
        let req: BulkInvoiceRequest = serde_json::from_value(serde_json::json!({
            "appointmentIds": [7],
            "clientName": "Ada Lovelace",
            "amount": 0.0,
        }))
        .unwrap();
        assert!(req.invoice_id.is_none());
    }
}
