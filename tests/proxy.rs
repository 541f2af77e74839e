//! Broker proxy against an in-process mock of the DhanHQ REST API.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use dhan_guard::client::DhanClient;
use dhan_guard::config::BrokerConfig;
use dhan_guard::risk::*;
use dhan_guard::types::traders_control::SettingsPatch;
use dhan_guard::BrokerProxy;
use parking_lot::Mutex;
use serde_json::{Value, json};

const CLIENT_ID: &str = "1000000003";
const TOKEN: &str = "test-token";

// ===================================================================
// Mock broker
// ===================================================================

#[derive(Debug, Clone)]
struct Hit {
    method: &'static str,
    path: String,
    body: Option<Value>,
    token: Option<String>,
}

#[derive(Default)]
struct Mock {
    hits: Mutex<Vec<Hit>>,
}

impl Mock {
    fn record(&self, method: &'static str, path: String, headers: &HeaderMap, body: Option<Value>) {
        let token = headers
            .get("access-token")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        self.hits.lock().push(Hit {
            method,
            path,
            body,
            token,
        });
    }

    fn hits(&self) -> Vec<Hit> {
        self.hits.lock().clone()
    }
}

type Shared = State<Arc<Mock>>;

async fn place_order(
    State(mock): Shared,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    mock.record("POST", "/v2/orders".into(), &headers, Some(body.clone()));
    if body["securityId"] == "99999" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "errorType": "Order_Error",
                "errorCode": "DH-906",
                "errorMessage": "Incorrect order request"
            })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "orderId": "112111182198", "orderStatus": "PENDING" })),
    )
}

async fn modify_order(
    State(mock): Shared,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    mock.record("PUT", format!("/v2/orders/{id}"), &headers, Some(body));
    Json(json!({ "orderId": id, "orderStatus": "TRANSIT" }))
}

async fn cancel_order(State(mock): Shared, Path(id): Path<String>, headers: HeaderMap) -> Json<Value> {
    mock.record("DELETE", format!("/v2/orders/{id}"), &headers, None);
    Json(json!({ "orderId": id, "orderStatus": "CANCELLED" }))
}

async fn order_book(State(mock): Shared, headers: HeaderMap) -> Json<Value> {
    mock.record("GET", "/v2/orders".into(), &headers, None);
    Json(json!([{ "orderId": "112111182198", "orderStatus": "PENDING", "securityId": "11536" }]))
}

async fn cancel_super_leg(
    State(mock): Shared,
    Path((id, leg)): Path<(String, String)>,
    headers: HeaderMap,
) -> Json<Value> {
    mock.record("DELETE", format!("/v2/super/orders/{id}/{leg}"), &headers, None);
    Json(json!({ "orderId": id, "orderStatus": "CANCELLED" }))
}

async fn positions(State(mock): Shared, headers: HeaderMap) -> Json<Value> {
    mock.record("GET", "/v2/positions".into(), &headers, None);
    Json(json!([
        {
            "tradingSymbol": "TCS",
            "securityId": "11536",
            "realizedProfit": -800.0,
            "unrealizedProfit": -400.0,
            "dayBuyQty": 5,
            "daySellQty": 5,
            "netQty": 0
        }
    ]))
}

async fn holdings(State(mock): Shared, headers: HeaderMap) -> (StatusCode, &'static str) {
    mock.record("GET", "/v2/holdings".into(), &headers, None);
    (StatusCode::SERVICE_UNAVAILABLE, "upstream maintenance")
}

async fn kill_switch(
    State(mock): Shared,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Json<Value> {
    let status = query.get("killSwitchStatus").cloned().unwrap_or_default();
    mock.record("POST", format!("/v2/killswitch?killSwitchStatus={status}"), &headers, None);
    Json(json!({
        "dhanClientId": CLIENT_ID,
        "killSwitchStatus": format!("Kill Switch status: {status}")
    }))
}

async fn spawn_mock() -> (String, Arc<Mock>) {
    let mock = Arc::new(Mock::default());
    let app = Router::new()
        .route("/v2/orders", post(place_order).get(order_book))
        .route("/v2/orders/:id", put(modify_order).delete(cancel_order))
        .route("/v2/super/orders/:id/:leg", delete(cancel_super_leg))
        .route("/v2/positions", get(positions))
        .route("/v2/holdings", get(holdings))
        .route("/v2/killswitch", post(kill_switch))
        .with_state(mock.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), mock)
}

// ===================================================================
// Proxy fixture
// ===================================================================

struct Fixture {
    proxy: BrokerProxy,
    mock: Arc<Mock>,
    notifier: Arc<RecordingNotifier>,
}

fn proxy_for(base_url: &str) -> (BrokerProxy, Arc<RecordingNotifier>) {
    let config = BrokerConfig::new(CLIENT_ID, TOKEN)
        .with_base_url(base_url)
        .unwrap();
    let client = DhanClient::new(&config).unwrap();
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2026, 3, 10, 4, 0, 0).unwrap(),
    ));
    let store = Arc::new(KillSwitchStore::load(Arc::new(MemoryStorage::new()), clock));
    let notifier = Arc::new(RecordingNotifier::new());
    let proxy = BrokerProxy::new(client, TradingGuard::new(store, notifier.clone()));
    (proxy, notifier)
}

async fn fixture() -> Fixture {
    let (base_url, mock) = spawn_mock().await;
    let (proxy, notifier) = proxy_for(&base_url);
    Fixture {
        proxy,
        mock,
        notifier,
    }
}

fn market_order() -> Value {
    json!({
        "transactionType": "BUY",
        "exchangeSegment": "NSE_EQ",
        "productType": "INTRADAY",
        "orderType": "MARKET",
        "validity": "DAY",
        "securityId": "11536",
        "quantity": 5
    })
}

// ===================================================================
// Orders
// ===================================================================

#[tokio::test]
async fn place_order_injects_client_id_and_forwards() {
    let f = fixture().await;

    let envelope = f.proxy.place_order(&market_order()).await;
    assert!(envelope.success, "{envelope:?}");
    assert_eq!(envelope.status, 200);
    assert_eq!(envelope.data.unwrap().order_id, "112111182198");

    let hits = f.mock.hits();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].method, "POST");
    assert_eq!(hits[0].token.as_deref(), Some(TOKEN));
    let body = hits[0].body.as_ref().unwrap();
    assert_eq!(body["dhanClientId"], CLIENT_ID);
    assert_eq!(body["quantity"], 5);
    assert!(body.get("price").is_none());
}

#[tokio::test]
async fn invalid_order_never_reaches_broker() {
    let f = fixture().await;
    let mut body = market_order();
    body["orderType"] = json!("LIMIT");
    body["price"] = json!(0);

    let envelope = f.proxy.place_order(&body).await;
    assert!(!envelope.success);
    assert_eq!(envelope.status, 400);
    assert_eq!(envelope.error.as_deref(), Some("Validation error"));
    assert!(envelope.message.unwrap().starts_with("price is required"));
    assert!(f.mock.hits().is_empty());
}

#[tokio::test]
async fn broker_rejection_is_mirrored() {
    let f = fixture().await;
    let mut body = market_order();
    body["securityId"] = json!("99999");

    let envelope = f.proxy.place_order(&body).await;
    assert!(!envelope.success);
    assert_eq!(envelope.status, 400);
    assert_eq!(envelope.error.as_deref(), Some("Incorrect order request"));
    assert_eq!(envelope.message.as_deref(), Some("DH-906"));
    assert_eq!(f.mock.hits().len(), 1);

    let notes = f.notifier.drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Place Order Failed");
}

#[tokio::test]
async fn non_json_error_keeps_status_and_body() {
    let f = fixture().await;
    let envelope = f.proxy.get_holdings().await;
    assert!(!envelope.success);
    assert_eq!(envelope.status, 503);
    assert_eq!(envelope.message.as_deref(), Some("upstream maintenance"));
}

#[tokio::test]
async fn unreachable_broker_is_bad_gateway() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (proxy, _) = proxy_for(&format!("http://{addr}"));
    let envelope = proxy.get_orders().await;
    assert!(!envelope.success);
    assert_eq!(envelope.status, 502);
}

#[tokio::test]
async fn modify_with_mismatched_id_is_rejected_locally() {
    let f = fixture().await;
    let envelope = f
        .proxy
        .modify_order("ORD123", &json!({ "orderId": "ORD999", "quantity": 10 }))
        .await;
    assert_eq!(envelope.status, 400);
    assert_eq!(envelope.error.as_deref(), Some("Order ID mismatch"));
    assert!(f.mock.hits().is_empty());
}

#[tokio::test]
async fn modify_and_cancel_hit_the_order_path() {
    let f = fixture().await;
    let body = json!({
        "orderId": "112111182198",
        "orderType": "LIMIT",
        "validity": "DAY",
        "quantity": 10,
        "price": 1520.5
    });

    let modified = f.proxy.modify_order("112111182198", &body).await;
    assert!(modified.success, "{modified:?}");
    assert_eq!(modified.data.unwrap().order_status, "TRANSIT");

    let cancelled = f.proxy.cancel_order("112111182198").await;
    assert!(cancelled.success, "{cancelled:?}");

    let hits = f.mock.hits();
    assert_eq!(hits.len(), 2);
    assert_eq!((hits[0].method, hits[0].path.as_str()), ("PUT", "/v2/orders/112111182198"));
    assert_eq!(hits[0].body.as_ref().unwrap()["dhanClientId"], CLIENT_ID);
    assert_eq!((hits[1].method, hits[1].path.as_str()), ("DELETE", "/v2/orders/112111182198"));
}

#[tokio::test]
async fn order_book_is_not_guarded() {
    let f = fixture().await;
    f.proxy.activate_kill_switch("Reviewing");
    let envelope = f.proxy.get_orders().await;
    assert!(envelope.success);
    assert_eq!(envelope.data.unwrap().len(), 1);
}

// ===================================================================
// Kill switch
// ===================================================================

#[tokio::test]
async fn blocked_requests_make_no_http_calls() {
    let f = fixture().await;
    let status = f.proxy.activate_kill_switch("End of day").data.unwrap();
    assert!(status.is_active);

    let placed = f.proxy.place_order(&market_order()).await;
    let modified = f
        .proxy
        .modify_order(
            "112111182198",
            &json!({ "orderId": "112111182198", "orderType": "MARKET", "validity": "DAY" }),
        )
        .await;
    let cancelled = f.proxy.cancel_order("112111182198").await;
    let leg = f
        .proxy
        .cancel_super_order("112111182198", "ENTRY_LEG")
        .await;

    for status in [placed.status, modified.status, cancelled.status, leg.status] {
        assert_eq!(status, 403);
    }
    assert_eq!(placed.error.as_deref(), Some("Trade blocked by kill switch"));
    assert_eq!(placed.message.as_deref(), Some("End of day"));
    assert!(f.mock.hits().is_empty());
    assert_eq!(f.notifier.len(), 4);

    f.proxy.deactivate_kill_switch();
    assert!(f.proxy.place_order(&market_order()).await.success);
    assert_eq!(f.mock.hits().len(), 1);
}

#[tokio::test]
async fn pnl_refresh_trips_the_switch() {
    let f = fixture().await;
    let settings = f
        .proxy
        .update_traders_control_settings(SettingsPatch::daily_loss_limit(1_000.0));
    assert!(settings.success);

    assert!(f.proxy.refresh_daily_pnl().await.unwrap());
    let status = f.proxy.kill_switch_status().data.unwrap();
    assert!(status.is_active);
    assert_eq!(
        status.reason,
        "Daily loss limit of ₹1000.00 reached (loss ₹1200.00)"
    );
    assert_eq!(f.proxy.kill_switch().daily_pnl().trade_count, 1);

    let placed = f.proxy.place_order(&market_order()).await;
    assert_eq!(placed.status, 403);
    assert_eq!(
        f.mock.hits().iter().filter(|h| h.path == "/v2/orders").count(),
        0
    );
}

#[tokio::test]
async fn fetching_positions_updates_pnl() {
    let f = fixture().await;
    let envelope = f.proxy.get_positions().await;
    assert!(envelope.success);
    assert_eq!(envelope.data.unwrap().len(), 1);
    assert_eq!(f.proxy.kill_switch().current_daily_loss(), 1_200.0);
    // Default limit is 5000, so no activation.
    assert!(!f.proxy.kill_switch().is_active());
}

#[tokio::test]
async fn invalid_limit_is_a_bad_request() {
    let f = fixture().await;
    let envelope = f
        .proxy
        .update_traders_control_settings(SettingsPatch::daily_loss_limit(-5.0));
    assert_eq!(envelope.status, 400);
    assert!(!envelope.success);
    assert_eq!(
        f.proxy.traders_control_settings().data.unwrap().daily_loss_limit,
        5_000.0
    );
}

#[tokio::test]
async fn broker_kill_switch_uses_query_parameter() {
    let f = fixture().await;
    let envelope = f.proxy.set_broker_kill_switch(true).await;
    assert!(envelope.success, "{envelope:?}");
    f.proxy.set_broker_kill_switch(false).await;

    let paths: Vec<_> = f.mock.hits().into_iter().map(|h| h.path).collect();
    assert_eq!(
        paths,
        [
            "/v2/killswitch?killSwitchStatus=ACTIVATE",
            "/v2/killswitch?killSwitchStatus=DEACTIVATE"
        ]
    );
    // The local switch is independent.
    assert!(!f.proxy.kill_switch().is_active());
}

// ===================================================================
// Super orders
// ===================================================================

#[tokio::test]
async fn super_order_leg_is_validated() {
    let f = fixture().await;

    let bad = f.proxy.cancel_super_order("112111182198", "MIDDLE_LEG").await;
    assert_eq!(bad.status, 400);
    assert!(bad.message.unwrap().contains("legName"));
    assert!(f.mock.hits().is_empty());

    let ok = f.proxy.cancel_super_order("112111182198", "TARGET_LEG").await;
    assert!(ok.success, "{ok:?}");
    assert_eq!(f.mock.hits()[0].path, "/v2/super/orders/112111182198/TARGET_LEG");
}
