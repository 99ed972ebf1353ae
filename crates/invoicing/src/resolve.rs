//! Billing-customer resolution.

use bookwell_square::{BillingApi, SquareError};

/// Outcome of resolving a billing customer: either an existing provider
/// record was reused or a new one was created. Either way the id is what
/// downstream order/invoice calls need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerResolution {
    Existing(String),
    Created(String),
}

impl CustomerResolution {
    pub fn customer_id(&self) -> &str {
        match self {
            CustomerResolution::Existing(id) | CustomerResolution::Created(id) => id,
        }
    }

    pub fn into_customer_id(self) -> String {
        match self {
            CustomerResolution::Existing(id) | CustomerResolution::Created(id) => id,
        }
    }
}

/// Search-or-create: exact email lookup first, creation only as fallback.
///
/// The first search match wins; creation happens only when the search comes
/// back empty, so re-running the resolution for the same email stays
/// idempotent on the provider side.
pub async fn resolve_customer<B: BillingApi + ?Sized>(
    billing: &B,
    name: &str,
    email: &str,
) -> Result<CustomerResolution, SquareError> {
    let matches = billing.search_customers_by_email(email).await?;
    if let Some(existing) = matches.into_iter().next() {
        return Ok(CustomerResolution::Existing(existing.id));
    }

    let created = billing.create_customer(name, email).await?;
    Ok(CustomerResolution::Created(created.id))
}

/// Placeholder address used when a bulk run finds no client email anywhere:
/// lowercased display name, spaces replaced with dots, fixed domain. This is
/// a deliberate fallback, not a deliverable contact.
pub fn placeholder_email(display_name: &str) -> String {
    format!(
        "{}@example.com",
        display_name.to_lowercase().replace(' ', ".")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn placeholder_follows_the_documented_rule() {
        assert_eq!(placeholder_email("Ada Lovelace"), "ada.lovelace@example.com");
        assert_eq!(placeholder_email("GRACE"), "grace@example.com");
    }

    proptest! {
        #[test]
        fn placeholder_is_lowercase_and_spaceless(name in "[A-Za-z ]{1,32}") {
            let email = placeholder_email(&name);
            prop_assert!(email.ends_with("@example.com"));
            prop_assert!(!email.contains(' '));
            prop_assert_eq!(email.clone(), email.to_lowercase());
        }
    }
}
