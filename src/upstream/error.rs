//! Upstream failure taxonomy.

use std::error::Error as StdError;
use thiserror::Error;

/// Ways a single upstream call can fail.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UpstreamError {
    /// Connection refused, DNS failure, reset, or a body that could not be read.
    #[error("Failed to connect to upstream: {0}")]
    Unreachable(String),

    /// Body was not JSON or lacked a required field.
    #[error("Failed to parse upstream response: {0}")]
    Malformed(String),

    /// Well-formed reply with a non-"ok" status. Carries the upstream message.
    #[error("Upstream error: {0}")]
    Reported(String),
}

impl UpstreamError {
    /// Short tag used for metrics labels and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Unreachable(_) => "unreachable",
            UpstreamError::Malformed(_) => "malformed",
            UpstreamError::Reported(_) => "reported",
        }
    }

    /// Only an explicit upstream refusal is worth a second scheme.
    pub fn allows_scheme_fallback(&self) -> bool {
        matches!(self, UpstreamError::Reported(_))
    }
}

/// Render an error with its whole source chain, `outer: inner: root`.
///
/// reqwest keeps the interesting part ("Connection refused") in the sources.
pub(crate) fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !text.contains(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}
