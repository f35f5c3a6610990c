//! Configuration loading from the command line and process environment.

use clap::Parser;
use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::{
    AdapterConfig, DEFAULT_BIND_HOST, DEFAULT_DIRECT_PORT, DEFAULT_UPSTREAM_URL,
};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Command-line interface. Every flag falls back to an environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "flareproxy")]
#[command(about = "HTTP adapter that fetches pages through a FlareSolverr instance", long_about = None)]
pub struct Cli {
    /// FlareSolverr v1 endpoint receiving JSON commands.
    #[arg(long, env = "FLARESOLVERR_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    /// Interface to bind listeners on.
    #[arg(long, env = "BIND_HOST", default_value = DEFAULT_BIND_HOST)]
    pub bind_host: String,

    /// Port for direct mode (`/<domain>/<path>`).
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_DIRECT_PORT)]
    pub port: u16,

    /// Port for forward-proxy mode. Disabled when not set.
    #[arg(long, env = "PROXY_PORT")]
    pub proxy_port: Option<u16>,

    /// Address for the Prometheus scrape endpoint. Disabled when not set.
    #[arg(long, env = "METRICS_ADDRESS")]
    pub metrics_address: Option<SocketAddr>,
}

impl From<Cli> for AdapterConfig {
    fn from(cli: Cli) -> Self {
        Self {
            upstream_url: cli.upstream_url,
            bind_host: cli.bind_host,
            direct_port: cli.port,
            proxy_port: cli.proxy_port,
            metrics_address: cli.metrics_address,
        }
    }
}

/// Build and validate the adapter configuration from parsed arguments.
pub fn load_config(cli: Cli) -> Result<AdapterConfig, ConfigError> {
    let config = AdapterConfig::from(cli);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "flareproxy",
            "--upstream-url",
            "http://custom:9999/api",
            "--port",
            "9090",
            "--proxy-port",
            "3128",
            "--bind-host",
            "127.0.0.1",
        ])
        .unwrap();

        let config = load_config(cli).unwrap();
        assert_eq!(config.upstream_url, "http://custom:9999/api");
        assert_eq!(config.direct_address(), "127.0.0.1:9090");
        assert_eq!(config.proxy_address().as_deref(), Some("127.0.0.1:3128"));
        assert_eq!(config.metrics_address, None);
    }

    #[test]
    fn invalid_flags_fail_validation() {
        let cli = Cli::try_parse_from([
            "flareproxy",
            "--upstream-url",
            "flaresolverr",
            "--port",
            "8080",
            "--proxy-port",
            "8080",
        ])
        .unwrap();

        let err = load_config(cli).unwrap_err();
        let ConfigError::Validation(errors) = &err;
        assert_eq!(errors.len(), 2);
        assert!(err.to_string().starts_with("Validation failed: "));
        assert!(err.to_string().contains("port 8080"));
    }

    #[test]
    fn metrics_address_must_be_a_socket_address() {
        let result = Cli::try_parse_from(["flareproxy", "--metrics-address", "localhost"]);
        assert!(result.is_err());
    }
}
