use axum::Router;

pub mod square;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new().nest("/api/square", square::router())
}
