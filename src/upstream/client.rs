//! Translator between target URLs and FlareSolverr commands.
//!
//! # Responsibilities
//! - Build the JSON command for a target URL
//! - POST it to the configured endpoint
//! - Unwrap the JSON reply into page HTML or an [`UpstreamError`]
//!
//! # Design Decisions
//! - One `reqwest::Client` per process; cloning shares its connection pool
//! - No client-side timeout: `maxTimeout` is the service's to honor
//! - The HTTP status of the reply is ignored; the JSON `status` decides

use std::time::Instant;

use crate::observability::metrics;
use crate::upstream::command::{Intent, UpstreamCommand, UpstreamResult};
use crate::upstream::error::{error_chain, UpstreamError};

/// Handle to the upstream automation service.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    endpoint: String,
    http: reqwest::Client,
}

impl UpstreamClient {
    /// Create a client for the given endpoint with a fresh HTTP client.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_http_client(endpoint, reqwest::Client::new())
    }

    /// Create a client that reuses an existing HTTP client.
    pub fn with_http_client(endpoint: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch `target` through the upstream and return the rendered page.
    pub async fn fetch(&self, target: &str, intent: Intent) -> Result<String, UpstreamError> {
        let start = Instant::now();
        let result = self.execute(target, intent).await;

        match &result {
            Ok(body) => {
                tracing::debug!(
                    target_url = %target,
                    intent = intent.as_str(),
                    bytes = body.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream solved request"
                );
                metrics::record_upstream_call("ok", start);
            }
            Err(e) => {
                tracing::error!(
                    target_url = %target,
                    intent = intent.as_str(),
                    kind = e.kind(),
                    error = %e,
                    "Upstream request failed"
                );
                metrics::record_upstream_call(e.kind(), start);
            }
        }

        result
    }

    async fn execute(&self, target: &str, intent: Intent) -> Result<String, UpstreamError> {
        let command = UpstreamCommand::new(target, intent);

        // `.json()` sets `Content-Type: application/json`.
        let response = self
            .http
            .post(&self.endpoint)
            .json(&command)
            .send()
            .await
            .map_err(|e| UpstreamError::Unreachable(error_chain(&e)))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Unreachable(error_chain(&e)))?;

        unwrap_reply(&body)
    }
}

/// Turn a raw upstream body into page HTML or a typed failure.
pub fn unwrap_reply(body: &[u8]) -> Result<String, UpstreamError> {
    let reply: UpstreamResult =
        serde_json::from_slice(body).map_err(|e| UpstreamError::Malformed(e.to_string()))?;

    if !reply.is_ok() {
        return Err(UpstreamError::Reported(reply.message));
    }

    reply
        .solution
        .map(|solution| solution.response)
        .ok_or_else(|| UpstreamError::Malformed("missing field `solution`".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwrap_solved_reply() {
        let body = br#"{"status":"ok","message":"","solution":{"response":"<p>hi</p>","status":200}}"#;
        assert_eq!(unwrap_reply(body).unwrap(), "<p>hi</p>");
    }

    #[test]
    fn unwrap_reported_failure() {
        let body = br#"{"status":"error","message":"Error: Timeout reached"}"#;
        assert_eq!(
            unwrap_reply(body).unwrap_err(),
            UpstreamError::Reported("Error: Timeout reached".into())
        );
    }

    #[test]
    fn unwrap_non_json() {
        let err = unwrap_reply(b"<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, UpstreamError::Malformed(_)));
    }

    #[test]
    fn unwrap_ok_without_solution() {
        let err = unwrap_reply(br#"{"status":"ok"}"#).unwrap_err();
        assert_eq!(err, UpstreamError::Malformed("missing field `solution`".into()));
    }

    #[test]
    fn unwrap_solved_reply_with_null_metadata() {
        let body = br#"{"status":"ok","message":"","solution":{"response":"<p>x</p>","status":200,"cookies":null,"userAgent":null}}"#;
        assert_eq!(unwrap_reply(body).unwrap(), "<p>x</p>");
    }

    #[test]
    fn unwrap_failure_with_null_message_is_reported() {
        let err = unwrap_reply(br#"{"status":"error","message":null}"#).unwrap_err();
        assert_eq!(err, UpstreamError::Reported(String::new()));
        assert!(err.allows_scheme_fallback());
    }

    #[test]
    fn upstream_status_code_does_not_leak() {
        let body = br#"{"status":"ok","solution":{"response":"not found page","status":404}}"#;
        assert_eq!(unwrap_reply(body).unwrap(), "not found page");
    }
}
