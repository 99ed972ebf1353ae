//! Record types mirroring the store's camelCase rows.

use bookwell_core::AppointmentId;
use serde::{Deserialize, Serialize};

/// Whether an invoice has been successfully sent for an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillingStatus {
    #[default]
    Unbilled,
    Billed,
}

/// An appointment row. Prices are decimal dollars in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub billing_status: BillingStatus,
}

impl Appointment {
    /// Line-item title for billing; untitled appointments fall back to the
    /// product's default session label.
    pub fn line_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => "Therapy Session",
        }
    }

    /// Price in decimal dollars, absent treated as zero.
    pub fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }
}

/// A client row. Only the billing-relevant fields are read here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl ClientRecord {
    /// Email usable for invoicing; empty strings count as missing.
    pub fn billable_email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_decodes_from_store_row() {
        let appointment: Appointment = serde_json::from_value(serde_json::json!({
            "id": 7,
            "title": "Initial consultation",
            "price": 12.5,
            "clientName": "Ada Lovelace",
            "billingStatus": "unbilled",
        }))
        .unwrap();

        assert_eq!(appointment.id.as_i64(), 7);
        assert_eq!(appointment.line_title(), "Initial consultation");
        assert_eq!(appointment.billing_status, BillingStatus::Unbilled);
    }

    #[test]
    fn sparse_row_defaults_apply() {
        let appointment: Appointment =
            serde_json::from_value(serde_json::json!({"id": 3})).unwrap();

        assert_eq!(appointment.line_title(), "Therapy Session");
        assert_eq!(appointment.price_or_zero(), 0.0);
        assert_eq!(appointment.billing_status, BillingStatus::Unbilled);
    }

    #[test]
    fn empty_title_falls_back_to_session_label() {
        let appointment: Appointment =
            serde_json::from_value(serde_json::json!({"id": 3, "title": ""})).unwrap();
        assert_eq!(appointment.line_title(), "Therapy Session");
    }

    #[test]
    fn blank_email_is_not_billable() {
        let client: ClientRecord =
            serde_json::from_value(serde_json::json!({"name": "Ada", "email": ""})).unwrap();
        assert!(client.billable_email().is_none());

        let client: ClientRecord =
            serde_json::from_value(serde_json::json!({"name": "Ada", "email": "ada@example.org"}))
                .unwrap();
        assert_eq!(client.billable_email(), Some("ada@example.org"));
    }
}
