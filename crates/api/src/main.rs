#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    bookwell_observability::init();

    let config = bookwell_api::config::GatewayConfig::from_env()
        .expect("invalid gateway configuration");
    let port = config.port;

    let app = bookwell_api::app::build_app(config);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .unwrap_or_else(|e| panic!("failed to bind 0.0.0.0:{port}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
