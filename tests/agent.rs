//! End-to-end tests: a real agent against a stub registry over loopback.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use charger_agent::config::AppConfig;
use charger_agent::domain::{ChargerInfo, Location};
use charger_agent::server::{AgentHandle, AgentOptions};

#[derive(Clone)]
struct StubRegistry {
    failures: u32,
    hits: Arc<AtomicU32>,
    payloads: Arc<Mutex<Vec<Value>>>,
}

async fn register(State(stub): State<StubRegistry>, Json(body): Json<Value>) -> StatusCode {
    stub.payloads.lock().unwrap().push(body);
    let n = stub.hits.fetch_add(1, Ordering::SeqCst) + 1;
    if n <= stub.failures {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}

async fn spawn_registry(failures: u32) -> (String, StubRegistry) {
    let stub = StubRegistry {
        failures,
        hits: Arc::new(AtomicU32::new(0)),
        payloads: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/api/chargers/post", post(register))
        .with_state(stub.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/api/chargers/post"), stub)
}

fn config() -> AppConfig {
    let mut cfg = AppConfig::new(ChargerInfo {
        location: Location {
            latitude: 1.0,
            longitude: 2.0,
        },
        uuid: "abc".into(),
    });
    cfg.server.host = "127.0.0.1".into();
    cfg.server.shutdown_timeout = 5;
    cfg
}

async fn start(registry_url: String) -> AgentHandle {
    AgentHandle::start(
        AgentOptions::new(config())
            .with_registry_url(registry_url)
            .with_retry_delay(Duration::from_millis(50)),
    )
    .await
    .unwrap()
}

async fn wait_for_hits(stub: &StubRegistry, n: u32) {
    tokio::time::timeout(Duration::from_secs(10), async {
        while stub.hits.load(Ordering::SeqCst) < n {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("registry was not contacted in time");
}

#[tokio::test]
async fn registers_with_bound_port_after_retries() {
    let (url, stub) = spawn_registry(2).await;
    let handle = start(url).await;

    wait_for_hits(&stub, 3).await;
    // Accepted on the third attempt; nothing follows.
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(stub.hits.load(Ordering::SeqCst), 3);

    let expected = json!({
        "location": {"lat": 1.0, "lng": 2.0},
        "uuid": "abc",
        "port": handle.port()
    });
    assert_ne!(handle.port(), 0);
    for payload in stub.payloads.lock().unwrap().iter() {
        assert_eq!(payload, &expected);
    }

    handle.shutdown().await;
}

#[tokio::test]
async fn api_serves_while_registry_is_down() {
    let (url, stub) = spawn_registry(u32::MAX).await;
    let handle = start(url).await;
    let base = format!("http://{}", handle.local_addr);
    let http = reqwest::Client::new();

    let config: Value = http
        .get(format!("{base}/config"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(config["uuid"], "abc");
    assert_eq!(config["port"], handle.port());

    let reservation = json!({
        "reservation_id": "r1",
        "start_time": "2024-05-01T10:00:00+02:00",
        "end_time": "2024-05-01T11:00:00+02:00",
        "reservation_state": "pending",
        "vehicle_distance": 5,
        "state_upatde_time": "2024-05-01T09:00:00+02:00"
    });
    let resp = http
        .post(format!("{base}/reserve"))
        .json(&reservation)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.json::<Value>().await.unwrap(), json!({"status": "OK"}));

    let listed: Value = http
        .get(format!("{base}/reservations"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, json!({"r1": reservation}));

    let resp = http
        .delete(format!("{base}/reserve"))
        .json(&json!({"reservation_id": "r1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let listed: Value = http
        .get(format!("{base}/reservations"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, json!({}));

    // Registration keeps failing in the background the whole time.
    wait_for_hits(&stub, 2).await;

    handle.shutdown().await;
}

#[tokio::test]
async fn shutdown_stops_api_and_registration() {
    let (url, stub) = spawn_registry(u32::MAX).await;
    let handle = start(url).await;
    let addr = handle.local_addr;
    wait_for_hits(&stub, 1).await;

    handle.shutdown().await;

    let hits = stub.hits.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(stub.hits.load(Ordering::SeqCst), hits);
    assert!(tokio::net::TcpStream::connect(addr).await.is_err());
}
