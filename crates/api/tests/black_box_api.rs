use bookwell_api::config::GatewayConfig;
use bookwell_square::{SquareConfig, SquareEnvironment};
use reqwest::StatusCode;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Build the prod router against unreachable upstreams and bind it to an
    /// ephemeral port. Good enough for everything that must fail before the
    /// first upstream call.
    async fn spawn() -> Self {
        let config = GatewayConfig {
            square: SquareConfig {
                access_token: "test-token".to_string(),
                environment: SquareEnvironment::Sandbox,
                location_id: "L1".to_string(),
            },
            datastore_endpoint: "http://127.0.0.1:1".to_string(),
            jwks_url: "http://127.0.0.1:1/jwks.json".to_string(),
            port: 0,
        };

        let app = bookwell_api::app::build_app(config);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn public_endpoints_respond_without_auth() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Welcome to the Bookwell API");
}

#[tokio::test]
async fn invoice_endpoints_require_a_bearer_token() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!(
            "{}/api/square/invoice/create-and-send",
            srv.base_url
        ))
        .json(&serde_json::json!({"appointment_id": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/api/square/invoice/inv-1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_authorization_headers_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for header in ["Basic abc", "Bearer", "Bearer "] {
        let res = client
            .post(format!("{}/api/square/invoices", srv.base_url))
            .header("Authorization", header)
            .json(&serde_json::json!({
                "appointmentIds": [1],
                "clientName": "Ada Lovelace",
                "amount": 1.0,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "header {header:?}");
    }
}

#[tokio::test]
async fn unverifiable_token_is_rejected() {
    // Malformed token and an unreachable JWKS endpoint: either way the
    // middleware fails closed.
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/square/invoice/inv-1", srv.base_url))
        .bearer_auth("not-a-real-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
