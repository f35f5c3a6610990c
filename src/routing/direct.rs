//! Direct mode: the target is spelled out in the request path.
//!
//! # Responsibilities
//! - Reject paths without a domain before touching the upstream
//! - Map the inbound verb to an [`Intent`]
//! - Try HTTPS first, then HTTP once if the upstream reported a failure
//!
//! # Design Decisions
//! - The fallback is a bounded loop over [`Scheme::FALLBACK_ORDER`]
//! - Transport and parse errors end the request; only a reported failure
//!   means the site itself may be reachable over plain HTTP

use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
};
use std::time::Instant;

use crate::http::{request::request_id, response};
use crate::observability::metrics;
use crate::routing::target::{DirectTarget, Scheme};
use crate::routing::RequestHandler;
use crate::upstream::{Intent, UpstreamClient, UpstreamError};

/// Handler for `/<domain>[/<path>][?<query>]` requests.
#[derive(Debug, Clone)]
pub struct DirectRouter {
    upstream: UpstreamClient,
}

impl DirectRouter {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }

    /// Fetch `target`, trying each scheme in order until one succeeds or a
    /// failure is not eligible for fallback.
    pub async fn fetch(
        &self,
        target: &DirectTarget,
        intent: Intent,
        request_id: &str,
    ) -> Result<String, UpstreamError> {
        let [attempts @ .., last] = Scheme::FALLBACK_ORDER;

        for scheme in attempts {
            let url = target.url(scheme);
            match self.upstream.fetch(&url, intent).await {
                Err(e) if e.allows_scheme_fallback() => {
                    tracing::info!(
                        request_id = %request_id,
                        url = %url,
                        error = %e,
                        "Upstream refused {} target, retrying with {}",
                        scheme,
                        last
                    );
                    metrics::record_fallback();
                }
                result => return result,
            }
        }

        self.upstream.fetch(&target.url(last), intent).await
    }
}

/// Classify the inbound verb.
pub fn intent_for(method: &Method) -> Intent {
    if method == Method::POST {
        Intent::PostLike
    } else {
        Intent::GetLike
    }
}

impl RequestHandler for DirectRouter {
    fn mode(&self) -> &'static str {
        "direct"
    }

    async fn handle(&self, request: Request<Body>) -> Response {
        let start = Instant::now();
        let request_id = request_id(&request);
        let method = request.method().clone();

        let target = match DirectTarget::parse(request.uri().path(), request.uri().query()) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id,
                    path = %request.uri().path(),
                    "Rejected direct request: {}",
                    e
                );
                metrics::record_request(self.mode(), 400, start);
                return response::bad_request(e.to_string());
            }
        };

        if method != Method::GET && method != Method::POST {
            tracing::warn!(
                request_id = %request_id,
                method = %method,
                "Unsupported method in direct mode, forwarding as GET"
            );
        }
        let intent = intent_for(&method);

        tracing::debug!(
            request_id = %request_id,
            method = %method,
            domain = %target.domain(),
            remainder = %target.remainder(),
            "Forwarding direct request"
        );

        let response = match self.fetch(&target, intent, &request_id).await {
            Ok(body) => response::html(body),
            Err(e) => response::upstream_error(&e),
        };

        metrics::record_request(self.mode(), response.status().as_u16(), start);
        response
    }
}
