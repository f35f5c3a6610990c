//! HTTP adapter in front of a FlareSolverr instance.
//!
//! Two listeners share one upstream client:
//! - direct mode turns `/<domain>/<path>?<query>` into a fetch of
//!   `https://<domain>/<path>?<query>`, retrying once over HTTP when the
//!   upstream reports a failure
//! - proxy mode acts as a GET-only forward proxy
//!
//! Either way the client gets the solved page as `text/html` or a JSON
//! `{"error": ...}` body.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;
pub mod upstream;

pub use config::AdapterConfig;
pub use http::HttpServer;
pub use lifecycle::{Adapter, Shutdown, ShutdownReason};
pub use routing::{DirectRouter, ProxyRouter, RequestHandler};
pub use upstream::{UpstreamClient, UpstreamError};
