//! Shared utilities for integration tests.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use flareproxy::lifecycle::{Shutdown, ShutdownReason};
use flareproxy::upstream::UpstreamCommand;
use flareproxy::HttpServer;

type Reply = dyn Fn(&UpstreamCommand) -> (u16, String) + Send + Sync;

#[derive(Clone)]
struct StubState {
    calls: Arc<Mutex<Vec<UpstreamCommand>>>,
    reply: Arc<Reply>,
}

/// A fake FlareSolverr that records every command it receives.
pub struct StubUpstream {
    pub url: String,
    calls: Arc<Mutex<Vec<UpstreamCommand>>>,
}

impl StubUpstream {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Target URLs in the order they were requested.
    pub fn urls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|c| c.url.clone()).collect()
    }

    pub fn commands(&self) -> Vec<UpstreamCommand> {
        self.calls.lock().unwrap().clone()
    }
}

async fn stub_handler(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(command): Json<UpstreamCommand>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    assert_eq!(
        headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    let (status, body) = (state.reply)(&command);
    state.calls.lock().unwrap().push(command);
    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}

/// Start a stub upstream on an ephemeral port. `reply` maps each command
/// to an HTTP status and raw body.
pub async fn start_stub_upstream<F>(reply: F) -> StubUpstream
where
    F: Fn(&UpstreamCommand) -> (u16, String) + Send + Sync + 'static,
{
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        calls: calls.clone(),
        reply: Arc::new(reply),
    };
    let app = Router::new().route("/v1", post(stub_handler)).with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    StubUpstream {
        url: format!("http://{}/v1", addr),
        calls,
    }
}

/// Body of a solved FlareSolverr reply.
pub fn solved(html: &str) -> String {
    serde_json::json!({
        "status": "ok",
        "message": "Challenge not detected!",
        "solution": {
            "status": 200,
            "cookies": [],
            "userAgent": "Mozilla/5.0 (X11; Linux x86_64)",
            "response": html,
        }
    })
    .to_string()
}

/// Body of a failed FlareSolverr reply.
pub fn failed(message: &str) -> String {
    serde_json::json!({"status": "error", "message": message}).to_string()
}

/// An upstream URL nothing listens on.
pub async fn unreachable_upstream_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v1", addr)
}

/// A running adapter server. Stops when dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger(ShutdownReason::Signal);
    }
}

pub async fn spawn_server(server: HttpServer) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let drained = shutdown.wait();
    tokio::spawn(async move {
        let _ = server.run(listener, drained).await;
    });
    TestServer { addr, shutdown }
}

/// HTTP client that never picks up proxy settings from the environment.
pub fn direct_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// HTTP client that sends every `http://` request through `proxy`.
pub fn proxied_client(proxy: SocketAddr) -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .proxy(reqwest::Proxy::http(format!("http://{}", proxy)).unwrap())
        .build()
        .unwrap()
}

pub fn content_type(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
