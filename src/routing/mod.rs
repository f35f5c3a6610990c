//! Request routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → direct.rs: /<domain>/<path>?<query> → https://<domain>/<path>?<query>
//!                  (one HTTP retry on upstream-reported failure)
//!     → proxy.rs:  GET http://host/path → https://host/path
//!                  (CONNECT and other verbs refused)
//!     → UpstreamClient::fetch
//!     → http::response shapes the reply
//! ```
//!
//! # Design Decisions
//! - Both routers implement [`RequestHandler`]; the server is generic over it
//! - Routers hold no per-request state

pub mod direct;
pub mod proxy;
pub mod target;

use axum::{body::Body, http::Request, response::Response};
use std::future::Future;

pub use direct::DirectRouter;
pub use proxy::ProxyRouter;
pub use target::{DirectTarget, Scheme, TargetError};

/// A stateless handler that turns one inbound request into one response.
pub trait RequestHandler: Send + Sync + 'static {
    /// Mode label for logs and metrics.
    fn mode(&self) -> &'static str;

    fn handle(&self, request: Request<Body>) -> impl Future<Output = Response> + Send;
}
