//! Upstream client wiring.

use bookwell_datastore::DataStoreClient;
use bookwell_invoicing::{InvoiceOrchestrator, RemoteWorkflowStore};
use bookwell_scheduling::RemoteSchedulingStore;
use bookwell_square::SquareClient;

use crate::config::GatewayConfig;

/// The production orchestrator with its real ports plugged in.
pub type Orchestrator =
    InvoiceOrchestrator<RemoteSchedulingStore, SquareClient, RemoteWorkflowStore>;

/// Long-lived service handles shared by all requests.
pub struct AppServices {
    pub invoicing: Orchestrator,
}

pub fn build_services(http: reqwest::Client, config: &GatewayConfig) -> AppServices {
    let data = DataStoreClient::new(http.clone(), config.datastore_endpoint.clone());
    let scheduling = RemoteSchedulingStore::new(data.clone());
    let workflows = RemoteWorkflowStore::new(data);

    let environment = config.square.environment;
    let billing = SquareClient::new(http, config.square.clone());

    AppServices {
        invoicing: InvoiceOrchestrator::new(scheduling, billing, workflows, environment),
    }
}
