//! Wire-level gateway tests against a scripted HTTP server.
//!
//! Covers identity-header propagation, envelope decoding, and the
//! normalization of server refusals, missing routes and dead transports.

use kirana_core::SessionUser;
use kirana_gateway::{ClientConfig, GatewayClient, SessionStore};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cashier(username: &str) -> SessionUser {
    SessionUser {
        username: username.to_string(),
        shop_name: Some("Asha General Store".to_string()),
        full_address: None,
        contact_number: None,
        pincode: None,
    }
}

async fn client_for(server: &MockServer, session: SessionStore) -> GatewayClient {
    let config = ClientConfig::new(server.uri()).unwrap();
    GatewayClient::new(config, session).unwrap()
}

#[tokio::test]
async fn attaches_identity_header_when_session_cached() {
    let server = MockServer::start().await;

    // The mock only matches when the identity header is present with the
    // cached username, so a successful call proves propagation.
    Mock::given(method("GET"))
        .and(path("/products/barcode/8901030865278"))
        .and(header("x-username", "asha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "id": "p1",
                "barcodeId": "8901030865278",
                "name": "Toor Dal 1kg",
                "category": "Grocery",
                "price": 180.0,
                "stock": 12
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, SessionStore::with_user(cashier("asha"))).await;
    let product = client.product_by_barcode("8901030865278").await.unwrap();

    assert_eq!(product.name, "Toor Dal 1kg");
    assert_eq!(product.stock, 12);
}

#[tokio::test]
async fn omits_identity_header_without_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bills"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "billId": "b-1001" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, SessionStore::new()).await;
    let created = client.create_bill().await.unwrap();
    assert_eq!(created.bill_id, "b-1001");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(
        !requests[0]
            .headers
            .iter()
            .any(|(name, _)| name.as_str().eq_ignore_ascii_case("x-username")),
        "x-username must be omitted when no session is cached"
    );
}

#[tokio::test]
async fn server_refusal_surfaces_the_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bills/b-1/items"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "Product is out of stock"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, SessionStore::new()).await;
    let err = client.add_item("b-1", "890", 1).await.unwrap_err();

    assert_eq!(err.to_string(), "Product is out of stock");
    assert!(!err.is_connectivity());
    assert!(!err.is_endpoint_missing());
}

#[tokio::test]
async fn missing_route_is_distinguished_from_generic_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bi/forecast"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "message": "Route not found"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, SessionStore::new()).await;
    let err = client.forecast().await.unwrap_err();

    assert!(err.is_endpoint_missing());
    assert_eq!(
        err.panel_message(),
        "BI endpoint not available. Please check backend deployment."
    );
}

#[tokio::test]
async fn non_json_error_page_keeps_the_status_visible() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bills/b-9"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>boom</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, SessionStore::new()).await;
    let err = client.fetch_bill("b-9").await.unwrap_err();

    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn checkout_ack_without_data_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bills/b-7/checkout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let client = client_for(&server, SessionStore::new()).await;
    client.checkout_bill("b-7").await.unwrap();
}

#[tokio::test]
async fn dead_transport_reads_as_cannot_connect() {
    // Nothing listens on this port; the request must normalize into the
    // connectivity message, distinct from any validation failure.
    let config = ClientConfig::new("http://127.0.0.1:1").unwrap();
    let client = GatewayClient::new(config, SessionStore::new()).unwrap();

    let err = client.fetch_bill("b-1").await.unwrap_err();
    assert!(err.is_connectivity());
    assert!(err.to_string().contains("Cannot connect to server"));
}

#[tokio::test]
async fn sales_trends_passes_the_window_and_decodes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/bi/sales-trends"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "daily": [
                    { "date": "2026-08-01", "revenue": 1250.5, "count": 14 },
                    { "date": "2026-08-02", "revenue": 980.0, "count": 9 }
                ],
                "weeklyRevenue": 8400.0,
                "monthlyRevenue": 31250.0
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, SessionStore::new()).await;
    let trends = client.sales_trends(30).await.unwrap();

    assert_eq!(trends.daily.len(), 2);
    assert_eq!(trends.daily[0].count, 14);
    assert_eq!(trends.monthly_revenue, 31250.0);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("days=30"));
}
