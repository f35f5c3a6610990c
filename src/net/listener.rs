//! TCP listener binding.
//!
//! # Responsibilities
//! - Resolve and bind the configured address
//! - Report bind failures with the address that failed
//!
//! Bind failures are the only fatal runtime error in the adapter, so they
//! carry enough context to be printed as-is.

use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to bind to address.
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// Bind a TCP listener on `address` (`host:port`, host may be a name).
pub async fn bind(address: &str) -> Result<TcpListener, ListenerError> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| ListenerError::Bind {
            address: address.to_string(),
            source,
        })?;

    let local_addr: SocketAddr = listener.local_addr().map_err(|source| ListenerError::Bind {
        address: address.to_string(),
        source,
    })?;

    tracing::info!(address = %local_addr, "Listener bound");
    Ok(listener)
}
