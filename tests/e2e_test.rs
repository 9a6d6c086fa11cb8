// End-to-end: real proxy server + real reqwest upstream client talking to a
// fake Blockchair provider, both bound to local ports.

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use blockchair_proxy::api::server::create_app_with_config;
use blockchair_proxy::ProxyConfig;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

const API_KEY: &str = "e2e-key";
const BTC_ADDRESS: &str = "1BoatSLRHtKNngkdXEeobR76b53LETtpyT";

async fn fake_address(
    Path((chain, address)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if params.get("key").map(String::as_str) != Some(API_KEY) {
        return (
            StatusCode::OK,
            Json(json!({ "data": null, "context": { "code": 402, "error": "Invalid API key" } })),
        );
    }

    let transactions = if params.get("transaction_details").map(String::as_str) == Some("true") {
        json!([{ "hash": "ab".repeat(32), "time": "2024-01-02 03:04:05", "balance_change": 25000000 }])
    } else {
        // Plain dashboards list bare hashes
        json!(["ab".repeat(32)])
    };

    (
        StatusCode::OK,
        Json(json!({
            "data": {
                address: {
                    "address": {
                        "balance": 100000000,
                        "balance_usd": 42000.0,
                        "transaction_count": 1,
                        "first_seen_receiving": "2024-01-02 03:04:05",
                        "last_seen_receiving": "2024-01-02 03:04:05"
                    },
                    "transactions": transactions
                }
            },
            "context": { "code": 200, "state": 830000, "chain": chain }
        })),
    )
}

async fn fake_transaction(Path((_chain, _hash)): Path<(String, String)>) -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn fake_stats(Path(chain): Path<String>) -> impl IntoResponse {
    if chain == "litecoin" {
        return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({})));
    }
    (
        StatusCode::OK,
        Json(json!({ "data": { "blocks": 830000, "chain": chain }, "context": { "code": 200 } })),
    )
}

async fn spawn(app: Router) -> SocketAddr {
    let port = portpicker::pick_unused_port().expect("no free port");
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn start_stack(api_key: Option<&str>) -> SocketAddr {
    let provider = spawn(
        Router::new()
            .route("/{chain}/dashboards/address/{address}", get(fake_address))
            .route("/{chain}/dashboards/transaction/{hash}", get(fake_transaction))
            .route("/{chain}/stats", get(fake_stats)),
    )
    .await;

    let config = ProxyConfig::new(api_key.map(str::to_string))
        .with_base_url(&format!("http://{}", provider))
        .unwrap();
    spawn(create_app_with_config(config)).await
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap()
}

async fn post(proxy: SocketAddr, body: Value) -> (u16, Value) {
    let response = client()
        .post(format!("http://{}/", proxy))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_address_lookup_round_trip() {
    let proxy = start_stack(Some(API_KEY)).await;

    let (status, body) = post(
        proxy,
        json!({ "action": "address", "chain": "BITCOIN", "address": BTC_ADDRESS }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["context"]["chain"], "bitcoin");
    assert_eq!(body["data"][BTC_ADDRESS]["address"]["balance"], 100000000);
}

#[tokio::test]
async fn test_provider_logical_error() {
    // The proxy forwards a key the provider rejects
    let proxy = start_stack(Some("wrong-key")).await;

    let (status, body) = post(proxy, json!({ "action": "address", "address": BTC_ADDRESS })).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "Invalid API key" }));
}

#[tokio::test]
async fn test_status_translation() {
    let proxy = start_stack(Some(API_KEY)).await;

    let (status, body) = post(
        proxy,
        json!({ "action": "transaction", "chain": "dogecoin", "txHash": "cd".repeat(32) }),
    )
    .await;
    assert_eq!(status, 500);
    assert_eq!(
        body["error"],
        "Resource not found. Please verify the transaction hash is valid for dogecoin"
    );

    let (status, body) = post(proxy, json!({ "action": "stats", "chain": "litecoin" })).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Blockchair provider error: 503");
}

#[tokio::test]
async fn test_missing_credential_end_to_end() {
    let proxy = start_stack(None).await;

    let (status, body) = post(proxy, json!({ "action": "stats" })).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "BLOCKCHAIR_API_KEY is not configured" }));
}

#[tokio::test]
async fn test_typed_latest_transactions() {
    let proxy = start_stack(Some(API_KEY)).await;

    let response = client()
        .get(format!("http://{}/v1/bitcoin/address/{}/transactions", proxy, BTC_ADDRESS))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!([{
            "hash": "ab".repeat(32),
            "time": "2024-01-02T03:04:05",
            "balanceChange": 0.25
        }])
    );
}

#[tokio::test]
async fn test_typed_stats() {
    let proxy = start_stack(Some(API_KEY)).await;

    let body: Value = client()
        .get(format!("http://{}/v1/ethereum/stats", proxy))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({ "blocks": 830000, "chain": "ethereum" }));
}

#[tokio::test]
async fn test_typed_address_summary() {
    let proxy = start_stack(Some(API_KEY)).await;

    let response = client()
        .get(format!("http://{}/v1/bitcoin/address/{}", proxy, BTC_ADDRESS))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["balance"], json!(1.0));
    assert_eq!(body["txCount"], 1);
    assert_eq!(body["lastSeen"], "2024-01-02T03:04:05");
}
