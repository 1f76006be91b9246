//! In-process HTTP provider for client tests, bound to an ephemeral port.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;

#[derive(Debug, Clone)]
pub struct Reply {
    status: u16,
    body: String,
}

impl Reply {
    pub fn json(body: &str) -> Self {
        Self { status: 200, body: body.to_string() }
    }

    pub fn status(status: u16) -> Self {
        Self { status, body: String::new() }
    }
}

#[derive(Clone)]
struct Shared {
    reply: Reply,
    hits: Arc<AtomicUsize>,
    last_query: Arc<Mutex<Option<HashMap<String, String>>>>,
}

pub struct FakeProvider {
    addr: SocketAddr,
    shared: Shared,
}

impl FakeProvider {
    pub fn url(&self) -> String {
        format!("http://{}/json", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.shared.hits.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<HashMap<String, String>> {
        self.shared.last_query.lock().unwrap().clone()
    }
}

pub async fn spawn(reply: Reply) -> FakeProvider {
    let shared = Shared {
        reply,
        hits: Arc::new(AtomicUsize::new(0)),
        last_query: Arc::new(Mutex::new(None)),
    };
    let app = Router::new()
        .route("/json", get(respond))
        .with_state(shared.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    FakeProvider { addr, shared }
}

/// URL of a port nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/json")
}

async fn respond(
    State(shared): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    shared.hits.fetch_add(1, Ordering::SeqCst);
    *shared.last_query.lock().unwrap() = Some(query);
    let status = StatusCode::from_u16(shared.reply.status).unwrap();
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        shared.reply.body.clone(),
    )
}
