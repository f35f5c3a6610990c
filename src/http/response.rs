//! Client-facing response shapes.
//!
//! Both routers answer with the same four shapes: solved HTML, an upstream
//! failure as JSON, a local validation failure as JSON, and a plain-text 405.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::upstream::UpstreamError;

/// Content type of every relayed page.
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// JSON error body: `{"error": "<message>"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

/// 200 with the solved page.
pub fn html(body: String) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HTML_CONTENT_TYPE)],
        body,
    )
        .into_response()
}

/// 500 with the upstream failure rendered as JSON.
pub fn upstream_error(err: &UpstreamError) -> Response {
    json_error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}

/// 400 for inbound requests that cannot be turned into a target URL.
pub fn bad_request(message: impl Into<String>) -> Response {
    json_error(StatusCode::BAD_REQUEST, message.into())
}

/// 405 with a plain-text explanation.
pub fn method_not_allowed(message: &'static str) -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, message).into_response()
}

fn json_error(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorBody { error })).into_response()
}
