//! Square credentials and environment selection.

use anyhow::Context;

/// Which Square environment the gateway talks to.
///
/// The mode string comes straight from configuration; anything that is not
/// exactly `sandbox` is treated as production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareEnvironment {
    Sandbox,
    Production,
}

impl SquareEnvironment {
    pub fn from_mode(mode: &str) -> Self {
        if mode == "sandbox" {
            SquareEnvironment::Sandbox
        } else {
            SquareEnvironment::Production
        }
    }

    /// Base URL for API calls.
    pub fn api_base_url(&self) -> &'static str {
        match self {
            SquareEnvironment::Sandbox => "https://connect.squareupsandbox.com",
            SquareEnvironment::Production => "https://connect.squareup.com",
        }
    }

    /// Merchant-dashboard URL for a published invoice.
    pub fn dashboard_invoice_url(&self, invoice_id: &str) -> String {
        match self {
            SquareEnvironment::Sandbox => {
                format!("https://squareupsandbox.com/dashboard/invoices/{invoice_id}")
            }
            SquareEnvironment::Production => {
                format!("https://squareup.com/dashboard/invoices/{invoice_id}")
            }
        }
    }
}

/// Credentials and fixed identifiers for the Square account.
#[derive(Debug, Clone)]
pub struct SquareConfig {
    pub access_token: String,
    pub environment: SquareEnvironment,
    pub location_id: String,
}

impl SquareConfig {
    /// Read the Square configuration from the environment. Called once at
    /// process start.
    pub fn from_env() -> anyhow::Result<Self> {
        let access_token =
            std::env::var("SQUARE_ACCESS_TOKEN").context("SQUARE_ACCESS_TOKEN must be set")?;
        let mode = std::env::var("SQUARE_ENVIRONMENT").unwrap_or_default();
        let location_id =
            std::env::var("SQUARE_LOCATION_ID").context("SQUARE_LOCATION_ID must be set")?;

        Ok(Self {
            access_token,
            environment: SquareEnvironment::from_mode(&mode),
            location_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sandbox_mode_selects_sandbox_urls() {
        let env = SquareEnvironment::from_mode("sandbox");
        assert_eq!(env, SquareEnvironment::Sandbox);
        assert_eq!(env.api_base_url(), "https://connect.squareupsandbox.com");
        assert_eq!(
            env.dashboard_invoice_url("inv-1"),
            "https://squareupsandbox.com/dashboard/invoices/inv-1"
        );
    }

    #[test]
    fn any_other_mode_is_production() {
        for mode in ["production", "", "SANDBOX", "staging"] {
            let env = SquareEnvironment::from_mode(mode);
            assert_eq!(env, SquareEnvironment::Production, "mode {mode:?}");
        }
        assert_eq!(
            SquareEnvironment::Production.dashboard_invoice_url("inv-2"),
            "https://squareup.com/dashboard/invoices/inv-2"
        );
    }
}
