//! HTTP collaborator client tests
//!
//! Runs the reqwest clients against a real local HTTP server standing in
//! for the node API and the faucet.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use wp_core::error::WalletError;
use wp_core::traits::{FaucetService, ReferralApi, WalletService};
use wp_orchestrator::clients::{HttpFaucetClient, HttpReferralClient, HttpWalletClient};

const TIMEOUT: Duration = Duration::from_secs(5);

/// Scripted responses served by the test faucet
struct ServerState {
    balances: Mutex<Vec<Value>>,
    airdrop_status: StatusCode,
}

async fn balance(State(state): State<Arc<ServerState>>) -> Json<Value> {
    let mut balances = state.balances.lock().unwrap();
    let body = if balances.is_empty() {
        json!({ "balance": 0 })
    } else {
        balances.remove(0)
    };
    Json(body)
}

async fn airdrop(State(state): State<Arc<ServerState>>) -> StatusCode {
    state.airdrop_status
}

async fn wallet_address() -> Json<Value> {
    Json(json!({ "data": { "address": "0xfeed" } }))
}

async fn ref_success() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Spawn a test server, returning its base URL
async fn spawn_server(balances: Vec<Value>, airdrop_status: StatusCode) -> String {
    let _ = tracing_subscriber::fmt::try_init();

    let state = Arc::new(ServerState {
        balances: Mutex::new(balances),
        airdrop_status,
    });

    let app = Router::new()
        .route("/balance", get(balance))
        .route("/airdrop", get(airdrop))
        .route("/wallet/address", get(wallet_address))
        .route("/ref_success", get(ref_success))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{}", addr)
}

#[tokio::test]
async fn test_wallet_address_resolution() {
    let base = spawn_server(vec![], StatusCode::OK).await;
    let client = HttpWalletClient::new(base, TIMEOUT);

    let address = client.address().await.unwrap();
    assert_eq!(address, "0xfeed");
}

#[tokio::test]
async fn test_balance_numeric_response() {
    let base = spawn_server(vec![json!({ "balance": 5 })], StatusCode::OK).await;
    let client = HttpFaucetClient::new(base, TIMEOUT);

    let balance = client.balance("0xfeed").await.unwrap();
    assert_eq!(balance, 5.0);
}

#[tokio::test]
async fn test_balance_numeric_string_response() {
    let base = spawn_server(vec![json!({ "balance": "2.5" })], StatusCode::OK).await;
    let client = HttpFaucetClient::new(base, TIMEOUT);

    let balance = client.balance("0xfeed").await.unwrap();
    assert_eq!(balance, 2.5);
}

#[tokio::test]
async fn test_balance_malformed_response() {
    let base = spawn_server(
        vec![json!({ "balance": "soon" }), json!({ "note": "no balance" })],
        StatusCode::OK,
    )
    .await;
    let client = HttpFaucetClient::new(base, TIMEOUT);

    let result = client.balance("0xfeed").await;
    assert!(matches!(result, Err(WalletError::MalformedBalance(_))));

    let result = client.balance("0xfeed").await;
    assert!(matches!(result, Err(WalletError::MalformedBalance(_))));
}

#[tokio::test]
async fn test_airdrop_success_and_failure() {
    let base = spawn_server(vec![], StatusCode::OK).await;
    let client = HttpFaucetClient::new(base, TIMEOUT);
    client.request_airdrop("0xfeed").await.unwrap();

    let failing = spawn_server(vec![], StatusCode::INTERNAL_SERVER_ERROR).await;
    let client = HttpFaucetClient::new(failing, TIMEOUT);
    let result = client.request_airdrop("0xfeed").await;
    assert!(matches!(result, Err(WalletError::Http(_))));
}

#[tokio::test]
async fn test_referral_notification() {
    let base = spawn_server(vec![], StatusCode::OK).await;
    let client = HttpReferralClient::new(base, TIMEOUT);
    client.notify_generated("WP-1234", "0xfeed").await.unwrap();
}

#[tokio::test]
async fn test_unreachable_service_maps_to_typed_error() {
    // Nothing listens here.
    let client = HttpFaucetClient::new("http://127.0.0.1:9", Duration::from_millis(500));
    let result = client.balance("0xfeed").await;
    assert!(matches!(result, Err(WalletError::Balance(_))));
}
