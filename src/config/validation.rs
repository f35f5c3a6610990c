//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (clap and serde handle syntactic)
//! - Validate the upstream endpoint is an http(s) URL
//! - Validate port values and detect listener conflicts
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AdapterConfig → Result<(), Vec<ValidationError>>
//! - Runs before any listener is bound

use thiserror::Error;
use url::Url;

use crate::config::schema::AdapterConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("upstream URL '{url}' is invalid: {reason}")]
    InvalidUpstreamUrl { url: String, reason: String },

    #[error("upstream URL '{url}' must use http or https, got '{scheme}'")]
    UnsupportedUpstreamScheme { url: String, scheme: String },

    #[error("{listener} port must be non-zero")]
    ZeroPort { listener: &'static str },

    #[error("direct and proxy listeners both use port {0}")]
    PortConflict(u16),
}

/// Check an [`AdapterConfig`] for semantic errors.
pub fn validate_config(config: &AdapterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.upstream_url) {
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError::UnsupportedUpstreamScheme {
                url: config.upstream_url.clone(),
                scheme: url.scheme().to_string(),
            });
        }
        Ok(_) => {}
        Err(e) => errors.push(ValidationError::InvalidUpstreamUrl {
            url: config.upstream_url.clone(),
            reason: e.to_string(),
        }),
    }

    if config.direct_port == 0 {
        errors.push(ValidationError::ZeroPort { listener: "direct" });
    }

    match config.proxy_port {
        Some(0) => errors.push(ValidationError::ZeroPort { listener: "proxy" }),
        Some(port) if port == config.direct_port => {
            errors.push(ValidationError::PortConflict(port));
        }
        _ => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
