//! Immutable request specifications for the record store.
//!
//! Each combinator consumes and returns the spec, so a half-built query can
//! never be observed and nothing is shared mutably between calls.

use serde::Serialize;
use serde_json::{Value, json};

/// A single filter clause. Clauses are conjunctive and order-preserving in
/// the request payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Filter {
    Eq { field: String, value: Value },
    In { field: String, value: Vec<Value> },
}

/// Sort specification. The store supports a single sort key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: &'static str,
}

/// A read request against one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    table: String,
    select: Vec<String>,
    filters: Vec<Filter>,
    order: Option<OrderBy>,
}

impl Query {
    /// Start a query against `table` selecting all fields.
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            select: Vec::new(),
            filters: Vec::new(),
            order: None,
        }
    }

    /// Restrict the returned fields.
    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Append an equality filter.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Append a set-membership filter.
    pub fn contained_in<I, V>(mut self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.filters.push(Filter::In {
            field: field.into(),
            value: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Set the sort field and direction. The last call wins.
    pub fn order_by(mut self, field: impl Into<String>, ascending: bool) -> Self {
        self.order = Some(OrderBy {
            field: field.into(),
            direction: if ascending { "asc" } else { "desc" },
        });
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Serialize into the store's wire payload.
    pub fn payload(&self) -> Value {
        let select: Vec<Value> = if self.select.is_empty() {
            vec![Value::String("*".to_string())]
        } else {
            self.select.iter().map(|f| json!(f)).collect()
        };

        let mut payload = json!({
            "select": select,
            "filters": self.filters,
        });
        if let Some(order) = &self.order {
            payload["orderBy"] = json!(order);
        }
        payload
    }
}

/// A scoped update against one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    table: String,
    patch: Value,
    filters: Vec<Filter>,
}

impl Update {
    /// Start an update of `table` applying `patch` to every matched record.
    pub fn table(table: impl Into<String>, patch: Value) -> Self {
        Self {
            table: table.into(),
            patch,
            filters: Vec::new(),
        }
    }

    /// Append an equality filter scoping the update.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn payload(&self) -> Value {
        json!({
            "patch": self.patch,
            "filters": self.filters,
        })
    }
}

/// A single-record insert into one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    table: String,
    record: Value,
}

impl Insert {
    pub fn new(table: impl Into<String>, record: Value) -> Self {
        Self {
            table: table.into(),
            record,
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn payload(&self) -> Value {
        json!({ "record": self.record })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_query_selects_all_fields() {
        let payload = Query::table("appointments").payload();
        assert_eq!(payload, json!({"select": ["*"], "filters": []}));
    }

    #[test]
    fn filters_are_order_preserving() {
        let payload = Query::table("appointments")
            .select(["id", "title"])
            .eq("clientName", "Ada Lovelace")
            .contained_in("id", [1, 2, 3])
            .payload();

        assert_eq!(
            payload,
            json!({
                "select": ["id", "title"],
                "filters": [
                    {"type": "eq", "field": "clientName", "value": "Ada Lovelace"},
                    {"type": "in", "field": "id", "value": [1, 2, 3]},
                ],
            })
        );
    }

    #[test]
    fn last_order_by_wins() {
        let payload = Query::table("appointments")
            .order_by("date", true)
            .order_by("price", false)
            .payload();

        assert_eq!(
            payload["orderBy"],
            json!({"field": "price", "direction": "desc"})
        );
    }

    #[test]
    fn update_payload_carries_patch_and_scope() {
        let update = Update::table("appointments", json!({"billingStatus": "billed"})).eq("id", 7);
        assert_eq!(
            update.payload(),
            json!({
                "patch": {"billingStatus": "billed"},
                "filters": [{"type": "eq", "field": "id", "value": 7}],
            })
        );
    }
}
