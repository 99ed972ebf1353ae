//! Process configuration, read once at startup.

use anyhow::Context;
use bookwell_square::SquareConfig;

/// Everything the gateway needs from the environment.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub square: SquareConfig,
    /// Base URL of the remote record store's data API.
    pub datastore_endpoint: String,
    /// JWKS endpoint of the identity provider.
    pub jwks_url: String,
    pub port: u16,
}

impl GatewayConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            square: SquareConfig::from_env()?,
            datastore_endpoint: std::env::var("DATASTORE_ENDPOINT")
                .context("DATASTORE_ENDPOINT must be set")?,
            jwks_url: std::env::var("JWKS_URL").context("JWKS_URL must be set")?,
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
        })
    }
}
