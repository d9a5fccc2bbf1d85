//! HTTP tests for the API router over the in-memory store.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tally_api::{AppState, create_router};
use tally_core::memory::{FailPoint, MemoryStore};
use tally_shared::StaticConfig;
use tower::ServiceExt;

fn app(store: &MemoryStore) -> Router {
    let config = StaticConfig::new()
        .with("TRANSFER_MIN_VALUE", "1")
        .with("TRANSFER_MAX_VALUE", "1000");
    create_router(AppState::new(Arc::new(store.clone()), Arc::new(config)))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn transfer(origin: i32, destination: i32, amount: &str) -> Value {
    json!({
        "origin_account_number": origin,
        "destination_account_number": destination,
        "amount": amount,
    })
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app(&MemoryStore::new()), get("/api/v1/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_create_and_fetch_client() {
    let store = MemoryStore::new();

    let (status, created) = send(
        app(&store),
        post("/api/v1/clients", &json!({ "name": "Ada", "balance": "150.25" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Ada");
    assert_eq!(created["account_balance"], "150.25");

    let number = created["account_number"].as_i64().unwrap();
    let (status, fetched) = send(app(&store), get(&format!("/api/v1/clients/{number}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_list_clients() {
    let store = MemoryStore::new();
    for name in ["Ada", "Grace"] {
        let (status, _) = send(
            app(&store),
            post("/api/v1/clients", &json!({ "name": name, "balance": "1" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(app(&store), get("/api/v1/clients")).await;
    assert_eq!(status, StatusCode::OK);
    let clients = body["clients"].as_array().unwrap();
    assert_eq!(clients.len(), 2);
    assert_eq!(clients[0]["name"], "Ada");
    assert_eq!(clients[1]["name"], "Grace");
}

#[tokio::test]
async fn test_blank_client_name_is_bad_request() {
    let (status, body) = send(
        app(&MemoryStore::new()),
        post("/api/v1/clients", &json!({ "name": "  ", "balance": "1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_NAME");
}

#[tokio::test]
async fn test_unknown_client_is_not_found() {
    let (status, body) = send(app(&MemoryStore::new()), get("/api/v1/clients/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "CLIENT_NOT_FOUND");
}

#[tokio::test]
async fn test_successful_transfer_is_created() {
    let store = MemoryStore::new();
    let origin = store.seed_account(dec!(123.00));
    let destination = store.seed_account(dec!(1.00));

    let (status, body) = send(
        app(&store),
        post(
            "/api/v1/transfers",
            &transfer(origin.into_inner(), destination.into_inner(), "10.00"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["state"], "committed");
    assert_eq!(body["amount"], "10.00");
    assert_eq!(store.balance_of(origin), Some(dec!(113.00)));
    assert_eq!(store.balance_of(destination), Some(dec!(11.00)));
}

#[tokio::test]
async fn test_out_of_range_is_bad_request() {
    let store = MemoryStore::new();
    let origin = store.seed_account(dec!(5000));
    let destination = store.seed_account(dec!(0));

    let (status, body) = send(
        app(&store),
        post(
            "/api/v1/transfers",
            &transfer(origin.into_inner(), destination.into_inner(), "1000.01"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "AMOUNT_OUT_OF_RANGE");
    assert_eq!(store.transfers_snapshot().len(), 1);
}

#[tokio::test]
async fn test_missing_account_is_bad_request() {
    let store = MemoryStore::new();
    let destination = store.seed_account(dec!(0));

    let (status, body) = send(
        app(&store),
        post("/api/v1/transfers", &transfer(404, destination.into_inner(), "5")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ACCOUNT_NOT_FOUND");
    assert_eq!(body["message"], "The origin account 404 was not found");
}

#[tokio::test]
async fn test_unaffordable_is_unprocessable() {
    let store = MemoryStore::new();
    let origin = store.seed_account(dec!(2));
    let destination = store.seed_account(dec!(0));

    let (status, body) = send(
        app(&store),
        post(
            "/api/v1/transfers",
            &transfer(origin.into_inner(), destination.into_inner(), "5"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "TRANSFER_NOT_ALLOWED");
}

#[tokio::test]
async fn test_storage_failure_hides_detail() {
    let store = MemoryStore::new();
    let origin = store.seed_account(dec!(100));
    let destination = store.seed_account(dec!(0));
    store.fail_on(FailPoint::Commit);

    let (status, body) = send(
        app(&store),
        post(
            "/api/v1/transfers",
            &transfer(origin.into_inner(), destination.into_inner(), "5"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "INTERNAL_ERROR");
    assert_eq!(body["message"], "An error occurred");
}

#[tokio::test]
async fn test_transfer_history_newest_first() {
    let store = MemoryStore::new();
    let a = store.seed_account(dec!(100));
    let b = store.seed_account(dec!(100));

    for amount in ["1", "2", "3"] {
        let (status, _) = send(
            app(&store),
            post("/api/v1/transfers", &transfer(a.into_inner(), b.into_inner(), amount)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(app(&store), get(&format!("/api/v1/transfers/{b}"))).await;
    assert_eq!(status, StatusCode::OK);
    let amounts: Vec<&str> = body["transfers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["amount"].as_str().unwrap())
        .collect();
    assert_eq!(amounts, vec!["3", "2", "1"]);
}

#[tokio::test]
async fn test_non_numeric_account_number_is_rejected() {
    let (status, body) = send(app(&MemoryStore::new()), get("/api/v1/transfers/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_REQUEST");
    assert!(body["message"].is_string());

    let (status, body) = send(app(&MemoryStore::new()), get("/api/v1/clients/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_malformed_body_is_enveloped() {
    let store = MemoryStore::new();
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/transfers")
        .header("content-type", "application/json")
        .body(Body::from("{\"origin_account_number\": 1,"))
        .unwrap();

    let (status, body) = send(app(&store), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_REQUEST");
    assert!(store.transfers_snapshot().is_empty());
}

#[tokio::test]
async fn test_amount_with_wrong_type_is_enveloped() {
    let store = MemoryStore::new();
    let (status, body) = send(
        app(&store),
        post(
            "/api/v1/clients",
            &json!({ "name": "Ada", "balance": ["not", "a", "number"] }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_REQUEST");
    assert!(store.accounts_snapshot().is_empty());
}
