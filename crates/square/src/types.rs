//! Wire types for the Square endpoints the gateway uses.
//!
//! Square's JSON is snake_case throughout, so field names map directly.
//! Only the fields this gateway reads or writes are modeled.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An amount in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: i64,
    pub currency: String,
}

impl Money {
    pub fn usd(amount: i64) -> Self {
        Self {
            amount,
            currency: "USD".to_string(),
        }
    }
}

/// One line of an order. Square wants the quantity as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub name: String,
    pub quantity: String,
    pub base_price_money: Money,
}

impl OrderLineItem {
    /// A single-quantity USD line.
    pub fn single(name: impl Into<String>, amount_minor: i64) -> Self {
        Self {
            name: name.into(),
            quantity: "1".to_string(),
            base_price_money: Money::usd(amount_minor),
        }
    }
}

/// A Square customer, as returned by search or create.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
}

/// A created order; only the id is consumed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Order {
    pub id: String,
}

/// A payment request attached to an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentRequest {
    #[serde(default)]
    pub request_type: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub computed_amount_money: Option<Money>,
}

/// A Square invoice. `version` is required for publishing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub version: i64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payment_requests: Option<Vec<PaymentRequest>>,
}

impl Invoice {
    /// The computed amount of the first payment request, zero if absent.
    pub fn first_payment_amount(&self) -> i64 {
        self.payment_requests
            .as_deref()
            .and_then(|reqs| reqs.first())
            .and_then(|req| req.computed_amount_money.as_ref())
            .map(|money| money.amount)
            .unwrap_or(0)
    }
}

/// Everything the orchestrator decides about a new invoice; the client adds
/// the account-level fields (location, delivery method, payment terms).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDraft {
    pub order_id: String,
    pub customer_id: String,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_item_serializes_the_way_square_expects() {
        let line = OrderLineItem::single("Therapy Session", 1250);
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Therapy Session",
                "quantity": "1",
                "base_price_money": {"amount": 1250, "currency": "USD"},
            })
        );
    }

    #[test]
    fn first_payment_amount_defaults_to_zero() {
        let invoice: Invoice =
            serde_json::from_value(serde_json::json!({"id": "inv-1", "version": 1})).unwrap();
        assert_eq!(invoice.first_payment_amount(), 0);

        let invoice: Invoice = serde_json::from_value(serde_json::json!({
            "id": "inv-1",
            "version": 2,
            "status": "UNPAID",
            "payment_requests": [
                {"request_type": "BALANCE", "computed_amount_money": {"amount": 4200, "currency": "USD"}},
            ],
        }))
        .unwrap();
        assert_eq!(invoice.first_payment_amount(), 4200);
    }
}
