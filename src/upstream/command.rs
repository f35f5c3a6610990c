//! Wire types for the FlareSolverr v1 JSON API.

use serde::{Deserialize, Deserializer, Serialize};

/// Automation verb for a plain page fetch.
pub const FETCH_COMMAND: &str = "request.get";

/// Time budget handed to the automation service, in milliseconds.
pub const MAX_TIMEOUT_MS: u64 = 60_000;

/// Status value the upstream uses for a solved request.
pub const STATUS_OK: &str = "ok";

/// How the inbound verb is classified before it reaches the upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    GetLike,
    PostLike,
}

impl Intent {
    /// Automation verb for this intent.
    ///
    /// The upstream only exposes page-fetch semantics, so both intents
    /// resolve to the same command.
    pub fn command(self) -> &'static str {
        match self {
            Intent::GetLike | Intent::PostLike => FETCH_COMMAND,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Intent::GetLike => "get",
            Intent::PostLike => "post",
        }
    }
}

/// Command envelope POSTed to the upstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamCommand {
    pub cmd: String,
    pub url: String,
    pub max_timeout: u64,
}

impl UpstreamCommand {
    pub fn new(url: impl Into<String>, intent: Intent) -> Self {
        Self {
            cmd: intent.command().to_string(),
            url: url.into(),
            max_timeout: MAX_TIMEOUT_MS,
        }
    }
}

/// Reply envelope returned by the upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamResult {
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default)]
    pub solution: Option<Solution>,
}

impl UpstreamResult {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// The solved page. Only `response` reaches the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    pub response: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: u16,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cookies: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_agent: String,
}

/// FlareSolverr sends `null` for fields it has nothing to say about.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
