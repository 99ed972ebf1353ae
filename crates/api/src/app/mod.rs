//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout mirrors the rest of the workspace:
//! - `services.rs`: upstream client wiring (record store, Square, workflows)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use bookwell_auth::JwksVerifier;

use crate::config::GatewayConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: GatewayConfig) -> Router {
    // One connection pool for every upstream: key fetch, record store, Square.
    let http = reqwest::Client::new();

    let verifier = Arc::new(JwksVerifier::new(http.clone(), config.jwks_url.clone()));
    let auth_state = middleware::AuthState { verifier };

    let services = Arc::new(services::build_services(http, &config));

    // Protected routes: bearer token required.
    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/", get(routes::system::root))
        .route("/health", get(routes::system::health))
        .merge(protected)
}
