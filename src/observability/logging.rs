//! Structured logging.
//!
//! Uses `tracing` with an `EnvFilter`, so `RUST_LOG` overrides the default
//! levels at runtime.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "flareproxy=info,tower_http=info";

/// Install the global subscriber. Call once, before anything logs.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
