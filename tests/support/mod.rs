//! Fake Remote Cache Service
//!
//! In-process stand-in for the BigCache HTTP API used by the integration
//! tests. Stores bodies verbatim and never interprets TTLs: expiry policy is
//! the client's job.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;

use bigcache_client::{ClientConfig, Clock, ManualClock, RemoteCacheStore};

/// Per-method request counters.
#[derive(Debug, Default)]
pub struct RequestCounts {
    pub gets: AtomicUsize,
    pub puts: AtomicUsize,
    pub deletes: AtomicUsize,
    pub clears: AtomicUsize,
}

/// State shared across all handlers.
#[derive(Clone, Default)]
pub struct FakeState {
    /// Stored request bodies by key
    pub entries: Arc<RwLock<HashMap<String, Value>>>,
    /// Keys whose writes answer 500
    pub failing_writes: Arc<RwLock<HashSet<String>>>,
    /// Keys whose reads answer 503
    pub failing_reads: Arc<RwLock<HashSet<String>>>,
    pub counts: Arc<RequestCounts>,
}

/// GET /api/v1/cache/:key
///
/// Missing keys answer 200 with an empty body.
async fn get_handler(State(state): State<FakeState>, Path(key): Path<String>) -> Response {
    state.counts.gets.fetch_add(1, Ordering::SeqCst);

    if state.failing_reads.read().await.contains(&key) {
        return (StatusCode::SERVICE_UNAVAILABLE, "busy").into_response();
    }

    let entries = state.entries.read().await;
    match entries.get(&key) {
        Some(body) => (StatusCode::OK, Json(body.clone())).into_response(),
        None => (StatusCode::OK, Body::empty()).into_response(),
    }
}

/// PUT /api/v1/cache/:key
async fn put_handler(
    State(state): State<FakeState>,
    Path(key): Path<String>,
    Json(body): Json<Value>,
) -> StatusCode {
    state.counts.puts.fetch_add(1, Ordering::SeqCst);

    if state.failing_writes.read().await.contains(&key) {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }

    state.entries.write().await.insert(key, body);
    StatusCode::CREATED
}

/// DELETE /api/v1/cache/:key
async fn delete_handler(State(state): State<FakeState>, Path(key): Path<String>) -> StatusCode {
    state.counts.deletes.fetch_add(1, Ordering::SeqCst);

    match state.entries.write().await.remove(&key) {
        Some(_) => StatusCode::OK,
        None => StatusCode::NOT_FOUND,
    }
}

/// DELETE /api/v1/cache/clear
async fn clear_handler(State(state): State<FakeState>) -> StatusCode {
    state.counts.clears.fetch_add(1, Ordering::SeqCst);
    state.entries.write().await.clear();
    StatusCode::OK
}

pub fn create_router(state: FakeState) -> Router {
    Router::new()
        .route("/api/v1/cache/clear", delete(clear_handler))
        .route(
            "/api/v1/cache/:key",
            get(get_handler).put(put_handler).delete(delete_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// A running fake service bound to an ephemeral local port.
pub struct FakeRemote {
    pub state: FakeState,
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl FakeRemote {
    pub async fn spawn() -> Self {
        let state = FakeState::default();
        let app = create_router(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            state,
            addr,
            handle,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig {
            host: "http://127.0.0.1".to_string(),
            port: self.addr.port(),
            timeout_secs: 5,
        }
    }

    /// Store driven by the given clock.
    pub fn store_with_clock(&self, clock: Arc<dyn Clock>) -> RemoteCacheStore {
        RemoteCacheStore::with_clock(&self.config(), clock).unwrap()
    }

    /// Store plus a handle on its clock, starting at wall-clock time.
    pub fn store(&self) -> (RemoteCacheStore, ManualClock) {
        let clock = ManualClock::starting_now();
        (self.store_with_clock(Arc::new(clock.clone())), clock)
    }

    /// The body the service holds for `key`.
    pub async fn raw(&self, key: &str) -> Option<Value> {
        self.state.entries.read().await.get(key).cloned()
    }

    pub async fn insert_raw(&self, key: &str, body: Value) {
        self.state
            .entries
            .write()
            .await
            .insert(key.to_string(), body);
    }

    pub async fn fail_writes_for(&self, key: &str) {
        self.state
            .failing_writes
            .write()
            .await
            .insert(key.to_string());
    }

    pub async fn fail_reads_for(&self, key: &str) {
        self.state
            .failing_reads
            .write()
            .await
            .insert(key.to_string());
    }

    pub fn gets(&self) -> usize {
        self.state.counts.gets.load(Ordering::SeqCst)
    }

    pub fn puts(&self) -> usize {
        self.state.counts.puts.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.state.counts.deletes.load(Ordering::SeqCst)
    }
}

impl Drop for FakeRemote {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
