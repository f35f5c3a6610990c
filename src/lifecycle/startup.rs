//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the shared upstream client once
//! - Bind every configured listener before serving any traffic
//! - Run the direct and (optional) proxy servers side by side
//! - Drain both on shutdown
//!
//! # Design Decisions
//! - Fail fast: a bind error is fatal, nothing is served
//! - The two servers share config and upstream client, nothing else

use std::future::Future;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinSet;

use crate::config::AdapterConfig;
use crate::http::HttpServer;
use crate::lifecycle::{Shutdown, ShutdownReason};
use crate::net::{self, ListenerError};
use crate::observability::metrics;
use crate::routing::{DirectRouter, ProxyRouter};
use crate::upstream::UpstreamClient;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("{mode} server failed: {source}")]
    Serve {
        mode: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Listeners bound and ready to serve.
pub struct Adapter {
    config: Arc<AdapterConfig>,
    direct: (HttpServer, TcpListener),
    proxy: Option<(HttpServer, TcpListener)>,
}

impl Adapter {
    /// Bind all listeners for `config`.
    pub async fn bind(config: AdapterConfig) -> Result<Self, StartupError> {
        let config = Arc::new(config);
        let upstream = UpstreamClient::new(config.upstream_url.clone());

        let direct_listener = net::bind(&config.direct_address()).await?;
        let direct = (
            HttpServer::new(DirectRouter::new(upstream.clone())),
            direct_listener,
        );

        let proxy = match config.proxy_address() {
            Some(address) => {
                let listener = net::bind(&address).await?;
                Some((HttpServer::new(ProxyRouter::new(upstream)), listener))
            }
            None => {
                tracing::info!("Proxy mode disabled (PROXY_PORT not set)");
                None
            }
        };

        Ok(Self {
            config,
            direct,
            proxy,
        })
    }

    /// Configuration the listeners were bound from.
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Address the direct-mode listener is bound to.
    pub fn direct_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.direct.1.local_addr()
    }

    /// Address the proxy-mode listener is bound to, if enabled.
    pub fn proxy_addr(&self) -> Option<std::io::Result<std::net::SocketAddr>> {
        self.proxy.as_ref().map(|(_, listener)| listener.local_addr())
    }

    /// Serve until `signal` completes, then drain both servers.
    pub async fn serve<F>(self, signal: F) -> Result<(), StartupError>
    where
        F: Future<Output = ()> + Send,
    {
        let Adapter {
            config,
            direct,
            proxy,
        } = self;

        tracing::info!(
            upstream_url = %config.upstream_url,
            direct = %config.direct_address(),
            proxy = ?config.proxy_address(),
            "Adapter serving"
        );

        let shutdown = Shutdown::new();
        let mut servers = JoinSet::new();

        for (server, listener) in std::iter::once(direct).chain(proxy) {
            let mode = server.mode();
            let drained = shutdown.wait();
            servers.spawn(async move {
                server
                    .run(listener, drained)
                    .await
                    .map_err(|source| StartupError::Serve { mode, source })
            });
        }

        let mut outcome = Ok(());
        tokio::select! {
            _ = signal => {
                shutdown.trigger(ShutdownReason::Signal);
            }
            Some(joined) = servers.join_next() => {
                shutdown.trigger(ShutdownReason::ServerExited);
                outcome = flatten(joined);
            }
        }

        tracing::info!(
            reason = ?shutdown.reason(),
            remaining = servers.len(),
            "Draining listeners"
        );

        while let Some(joined) = servers.join_next().await {
            outcome = outcome.and(flatten(joined));
        }
        outcome
    }
}

fn flatten(
    joined: Result<Result<(), StartupError>, tokio::task::JoinError>,
) -> Result<(), StartupError> {
    match joined {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, "Server task aborted");
            Ok(())
        }
    }
}

/// Run the adapter for the lifetime of the process.
pub async fn run(config: AdapterConfig) -> Result<(), StartupError> {
    tracing::info!(
        upstream_url = %config.upstream_url,
        direct_port = config.direct_port,
        proxy_port = ?config.proxy_port,
        "Configuration loaded"
    );

    if let Some(addr) = config.metrics_address {
        if let Err(e) = metrics::init_metrics(addr) {
            tracing::error!(metrics_address = %addr, error = %e, "Failed to start metrics exporter");
        }
    }

    let adapter = Adapter::bind(config).await?;
    adapter
        .serve(crate::lifecycle::signals::wait_for_shutdown_signal())
        .await
}
