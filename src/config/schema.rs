//! Configuration schema definitions.
//!
//! The adapter has a deliberately small surface: where the upstream
//! automation service lives, and which ports to listen on.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Default upstream endpoint (the FlareSolverr v1 API inside a compose network).
pub const DEFAULT_UPSTREAM_URL: &str = "http://flaresolverr:8191/v1";

/// Default port for the direct-mode listener.
pub const DEFAULT_DIRECT_PORT: u16 = 8080;

/// Default interface to bind listeners on.
pub const DEFAULT_BIND_HOST: &str = "0.0.0.0";

/// Root configuration for the adapter.
///
/// Resolved once at startup and shared read-only (behind an `Arc`) by every
/// listener for the lifetime of the process.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AdapterConfig {
    /// Upstream automation service endpoint that receives JSON commands.
    pub upstream_url: String,

    /// Interface both listeners bind to.
    pub bind_host: String,

    /// Port for path-based direct mode.
    pub direct_port: u16,

    /// Port for classic forward-proxy mode. Proxy mode is off when unset.
    pub proxy_port: Option<u16>,

    /// Address for the Prometheus scrape endpoint. Metrics export is off when unset.
    pub metrics_address: Option<SocketAddr>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            bind_host: DEFAULT_BIND_HOST.to_string(),
            direct_port: DEFAULT_DIRECT_PORT,
            proxy_port: None,
            metrics_address: None,
        }
    }
}

impl AdapterConfig {
    /// Socket address string for the direct-mode listener.
    pub fn direct_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.direct_port)
    }

    /// Socket address string for the proxy-mode listener, if enabled.
    pub fn proxy_address(&self) -> Option<String> {
        self.proxy_port
            .map(|port| format!("{}:{}", self.bind_host, port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_compose_deployment() {
        let config = AdapterConfig::default();
        assert_eq!(config.upstream_url, "http://flaresolverr:8191/v1");
        assert_eq!(config.direct_address(), "0.0.0.0:8080");
        assert_eq!(config.proxy_address(), None);
    }

    #[test]
    fn proxy_address_uses_bind_host() {
        let config = AdapterConfig {
            bind_host: "127.0.0.1".into(),
            proxy_port: Some(3128),
            ..Default::default()
        };
        assert_eq!(config.proxy_address().as_deref(), Some("127.0.0.1:3128"));
    }
}
