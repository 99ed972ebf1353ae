use axum::{Json, http::StatusCode, response::IntoResponse};

pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({"message": "Welcome to the Bookwell API"}))
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
