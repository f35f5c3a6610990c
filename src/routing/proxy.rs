//! Proxy mode: a forward proxy for GET only.
//!
//! Clients point their HTTP proxy setting at this listener. Tunnels are
//! refused because the upstream has to see the page to solve its challenge.

use axum::{
    body::Body,
    http::{header, Method, Request, Uri},
    response::Response,
};
use std::time::Instant;

use crate::http::{request::request_id, response};
use crate::observability::metrics;
use crate::routing::RequestHandler;
use crate::upstream::{Intent, UpstreamClient};

pub const CONNECT_NOT_SUPPORTED: &str = "CONNECT method is not supported. \
     FlareSolverr must see the request content to bypass protection, \
     so HTTPS tunneling cannot be used. Send plain GET requests through the proxy instead.";

pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// Handler for absolute-form `GET http://host/path` requests.
#[derive(Debug, Clone)]
pub struct ProxyRouter {
    upstream: UpstreamClient,
}

impl ProxyRouter {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }
}

/// Upgrade an `http://` target to `https://`. Other schemes pass through.
pub fn upgrade_scheme(url: &str) -> String {
    match url.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => url.to_string(),
    }
}

/// The absolute URL a proxied request is aimed at.
///
/// Origin-form requests (`GET /path` with a `Host` header) are rebuilt
/// as `http://<host>/path`.
pub fn absolute_target(request: &Request<Body>) -> Option<String> {
    let uri = request.uri();
    if uri.scheme().is_some() && uri.authority().is_some() {
        return Some(uri.to_string());
    }

    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .filter(|h| !h.is_empty())?;
    let path = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    Uri::builder()
        .scheme("http")
        .authority(host)
        .path_and_query(path)
        .build()
        .ok()
        .map(|uri| uri.to_string())
}

impl RequestHandler for ProxyRouter {
    fn mode(&self) -> &'static str {
        "proxy"
    }

    async fn handle(&self, request: Request<Body>) -> Response {
        let start = Instant::now();
        let request_id = request_id(&request);
        let method = request.method().clone();

        if method == Method::CONNECT {
            tracing::warn!(
                request_id = %request_id,
                authority = %request.uri(),
                "Refused CONNECT tunnel"
            );
            metrics::record_request(self.mode(), 405, start);
            return response::method_not_allowed(CONNECT_NOT_SUPPORTED);
        }

        if method != Method::GET {
            tracing::warn!(request_id = %request_id, method = %method, "Method not allowed in proxy mode");
            metrics::record_request(self.mode(), 405, start);
            return response::method_not_allowed(METHOD_NOT_ALLOWED);
        }

        let Some(target) = absolute_target(&request) else {
            tracing::warn!(request_id = %request_id, uri = %request.uri(), "Proxy request without target host");
            metrics::record_request(self.mode(), 400, start);
            return response::bad_request("Proxy request must carry an absolute URL or Host header");
        };
        let url = upgrade_scheme(&target);

        tracing::debug!(request_id = %request_id, url = %url, "Forwarding proxy request");

        let response = match self.upstream.fetch(&url, Intent::GetLike).await {
            Ok(body) => response::html(body),
            Err(e) => response::upstream_error(&e),
        };

        metrics::record_request(self.mode(), response.status().as_u16(), start);
        response
    }
}
