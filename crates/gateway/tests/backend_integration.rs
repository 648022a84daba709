//! Integration test: BackendClient <-> in-process REST server
//!
//! Stands up an axum server imitating the hosted backend's REST surface and
//! checks the client's wire behavior:
//! - Server time via rpc, and via the `Date` header fallback
//! - Waitlist insert, duplicate detection, counting
//! - Launch date lookup
//! - ClockSync end-to-end over the real HTTP adapter

use axum::{
    Json, Router,
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, head, post},
};
use chrono::{Duration, TimeZone, Utc};
use liftoff_clock::{ClockSync, SyncConfig, SyncOutcome, SystemClock};
use liftoff_core::WaitlistSignup;
use liftoff_gateway::{BackendClient, BackendConfig};
use liftoff_ports::{StoreError, TimeSource, TimeSourceError, WaitlistStore};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

const API_KEY: &str = "test-anon-key";

#[derive(Clone)]
struct Backend {
    /// When false, `get_server_time` is reported as missing (404)
    rpc_time: bool,
    /// When false, the counting HEAD omits `Content-Range`
    content_range: bool,
    /// Offset applied to the Date header relative to real time
    date_skew: Duration,
    emails: Arc<Mutex<HashSet<String>>>,
    /// Rows soft-deleted by an admin; only visible to unfiltered counts
    soft_deleted: usize,
    launch: Option<&'static str>,
}

impl Default for Backend {
    fn default() -> Self {
        Backend {
            rpc_time: true,
            content_range: true,
            date_skew: Duration::zero(),
            emails: Arc::new(Mutex::new(HashSet::new())),
            soft_deleted: 0,
            launch: Some("2026-03-01T18:00:00+00:00"),
        }
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    let apikey = headers.get("apikey").and_then(|v| v.to_str().ok());
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let expected_bearer = format!("Bearer {}", API_KEY);
    apikey == Some(API_KEY) && bearer == Some(expected_bearer.as_str())
}

async fn server_time(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if !backend.rpc_time {
        let body = json!({
            "code": "PGRST202",
            "message": "Could not find the function public.get_server_time"
        });
        return (StatusCode::NOT_FOUND, Json(body)).into_response();
    }
    Json(json!("2025-07-04T12:00:00.500+00:00")).into_response()
}

async fn root_head(State(backend): State<Backend>) -> Response {
    let date = (Utc::now() + backend.date_skew)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string();
    (StatusCode::OK, [(header::DATE, date)]).into_response()
}

async fn insert(State(backend): State<Backend>, Json(row): Json<Value>) -> Response {
    let email = row["email"].as_str().unwrap_or_default().to_string();
    if !backend.emails.lock().unwrap().insert(email) {
        let body = json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint \"waitlist_email_key\""
        });
        return (StatusCode::CONFLICT, Json(body)).into_response();
    }
    StatusCode::CREATED.into_response()
}

async fn count_head(
    State(backend): State<Backend>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let prefer = headers.get("prefer").and_then(|v| v.to_str().ok());
    let live_only = query
        .as_deref()
        .is_some_and(|q| q.split('&').any(|pair| pair == "is_deleted=eq.false"));
    let mut total = backend.emails.lock().unwrap().len();
    if !live_only {
        total += backend.soft_deleted;
    }
    if backend.content_range && prefer == Some("count=exact") {
        (StatusCode::OK, [(header::CONTENT_RANGE, format!("*/{}", total))]).into_response()
    } else {
        StatusCode::OK.into_response()
    }
}

async fn count_rpc(State(backend): State<Backend>) -> Response {
    Json(json!(backend.emails.lock().unwrap().len())).into_response()
}

async fn settings(State(backend): State<Backend>) -> Response {
    match backend.launch {
        Some(date) => Json(json!([{ "value": { "date": date } }])).into_response(),
        None => Json(json!([])).into_response(),
    }
}

async fn start_backend(backend: Backend) -> SocketAddr {
    let app = Router::new()
        .route("/rest/v1/", head(root_head))
        .route("/rest/v1/rpc/get_server_time", post(server_time))
        .route("/rest/v1/rpc/get_waitlist_count", post(count_rpc))
        .route("/rest/v1/waitlist", post(insert).head(count_head))
        .route("/rest/v1/settings", get(settings))
        .with_state(backend);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

fn client_for(addr: SocketAddr, api_key: &str) -> BackendClient {
    BackendClient::new(&BackendConfig::new(format!("http://{}/", addr), api_key)).unwrap()
}

#[tokio::test]
async fn test_server_time_via_rpc() {
    let _ = env_logger::try_init();
    let addr = start_backend(Backend::default()).await;
    let client = client_for(addr, API_KEY);

    let ts = client.server_time().await.unwrap();

    assert_eq!(
        ts,
        Utc.with_ymd_and_hms(2025, 7, 4, 12, 0, 0).unwrap() + Duration::milliseconds(500)
    );
}

#[tokio::test]
async fn test_server_time_rejects_bad_key() {
    let addr = start_backend(Backend::default()).await;
    let client = client_for(addr, "wrong-key");

    let err = client.server_time().await.unwrap_err();
    assert!(matches!(err, TimeSourceError::Network(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_date_header_fallback() {
    let addr = start_backend(Backend {
        date_skew: Duration::hours(1),
        ..Default::default()
    })
    .await;
    let client = client_for(addr, API_KEY);

    let ts = client.date_header().await.unwrap();
    let skew = ts - Utc::now();

    // Header has one-second resolution
    assert!(skew > Duration::minutes(59) && skew <= Duration::hours(1));
}

#[tokio::test]
async fn test_clock_sync_falls_back_over_http() {
    let addr = start_backend(Backend {
        rpc_time: false,
        date_skew: Duration::minutes(-10),
        ..Default::default()
    })
    .await;
    let client = Arc::new(client_for(addr, API_KEY));
    let sync = ClockSync::new(Arc::new(SystemClock::new()), client, SyncConfig::default());

    assert_eq!(sync.sync().await, SyncOutcome::Fallback);

    let offset = sync.offset_ms();
    assert!(
        (-601_000..=-599_000).contains(&offset),
        "offset {} ms should be about -10 minutes",
        offset
    );
}

#[tokio::test]
async fn test_clock_sync_with_unreachable_backend() {
    // Bind then drop a listener so the port is closed
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let client = Arc::new(client_for(addr, API_KEY));
    let sync = ClockSync::new(Arc::new(SystemClock::new()), client, SyncConfig::default());

    assert_eq!(sync.sync().await, SyncOutcome::Failed);
    assert_eq!(sync.offset_ms(), 0);
}

#[tokio::test]
async fn test_waitlist_insert_and_duplicate() {
    let addr = start_backend(Backend::default()).await;
    let client = client_for(addr, API_KEY);
    let entry = WaitlistSignup::new("Ada@Example.com").validate().unwrap();

    client.insert(&entry).await.unwrap();
    assert_eq!(client.insert(&entry).await, Err(StoreError::Duplicate));
    assert_eq!(client.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_count_falls_back_to_rpc() {
    let backend = Backend {
        content_range: false,
        ..Default::default()
    };
    backend.emails.lock().unwrap().extend(
        ["a@x.io", "b@x.io", "c@x.io"]
            .iter()
            .map(|s| s.to_string()),
    );
    let addr = start_backend(backend).await;
    let client = client_for(addr, API_KEY);

    assert!(client.count_from_header().await.is_err());
    assert_eq!(client.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_count_excludes_soft_deleted_rows() {
    let backend = Backend {
        soft_deleted: 2,
        ..Default::default()
    };
    backend.emails.lock().unwrap().extend(
        ["a@x.io", "b@x.io", "c@x.io"]
            .iter()
            .map(|s| s.to_string()),
    );
    let addr = start_backend(backend).await;
    let client = client_for(addr, API_KEY);

    assert_eq!(client.count_from_header().await.unwrap(), 3);
    assert_eq!(client.count().await.unwrap(), 3);
}

#[tokio::test]
async fn test_launch_date() {
    let addr = start_backend(Backend::default()).await;
    let client = client_for(addr, API_KEY);

    assert_eq!(
        client.launch_date().await.unwrap(),
        Some(Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap())
    );

    let addr = start_backend(Backend {
        launch: None,
        ..Default::default()
    })
    .await;
    assert_eq!(client_for(addr, API_KEY).launch_date().await.unwrap(), None);
}
