use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use bookwell_invoicing::BillingError;

pub fn billing_error_to_response(err: BillingError) -> axum::response::Response {
    match err {
        BillingError::AppointmentNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", "Appointment not found")
        }
        BillingError::InvoiceNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", "Invoice not found")
        }
        BillingError::WorkflowNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", "Workflow not found")
        }
        BillingError::NoValidAppointments => json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "No valid appointments found",
        ),
        BillingError::ClientEmailMissing => json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "Client must have an email",
        ),
        BillingError::PublishFailed(_) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "publish_failed",
            "Invoice publish failed",
        ),
        BillingError::Workflow(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "workflow_error",
            e.to_string(),
        ),
        BillingError::Store(e) => {
            json_error(StatusCode::BAD_GATEWAY, "datastore_error", e.to_string())
        }
        BillingError::Provider(e) => {
            json_error(StatusCode::BAD_GATEWAY, "billing_error", e.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
