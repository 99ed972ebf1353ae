use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use bookwell_core::AppointmentId;
use bookwell_invoicing::BulkInvoiceArgs;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::AuthContext;

pub fn router() -> Router {
    Router::new()
        .route("/invoice/create-and-send", post(create_and_send_invoice))
        .route("/invoice/:id", get(get_invoice_status))
        .route("/invoices", post(create_bulk_invoice))
}

pub async fn create_and_send_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<dto::InvoiceRequest>,
) -> axum::response::Response {
    tracing::info!(
        appointment_id = body.appointment_id,
        subject = auth.subject().unwrap_or("unknown"),
        "invoice requested"
    );

    match services
        .invoicing
        .send_invoice(AppointmentId::new(body.appointment_id))
        .await
    {
        Ok(sent) => (StatusCode::OK, Json(dto::invoice_sent_to_json(&sent))).into_response(),
        Err(e) => errors::billing_error_to_response(e),
    }
}

pub async fn create_bulk_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(auth): Extension<AuthContext>,
    Json(body): Json<dto::BulkInvoiceRequest>,
) -> axum::response::Response {
    tracing::info!(
        appointments = body.appointment_ids.len(),
        subject = auth.subject().unwrap_or("unknown"),
        "bulk invoice requested"
    );

    let args = BulkInvoiceArgs {
        appointment_ids: body
            .appointment_ids
            .into_iter()
            .map(AppointmentId::new)
            .collect(),
        client_name: body.client_name,
        amount: body.amount,
        invoice_record_id: body.invoice_id,
    };

    match services.invoicing.send_bulk_invoice(args).await {
        Ok(sent) => (StatusCode::OK, Json(dto::bulk_invoice_sent_to_json(&sent))).into_response(),
        Err(e) => errors::billing_error_to_response(e),
    }
}

pub async fn get_invoice_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.invoicing.invoice_status(&id).await {
        Ok(view) => (StatusCode::OK, Json(dto::invoice_status_to_json(&view))).into_response(),
        Err(e) => errors::billing_error_to_response(e),
    }
}
