//! flareproxy: fetch pages through FlareSolverr over plain HTTP.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                 FLAREPROXY                    │
//!                      │                                               │
//!  GET /site.com/path  │  ┌──────────┐    ┌─────────────┐              │
//!  ────────────────────┼─▶│  direct  │───▶│             │  POST /v1    │
//!                      │  │  router  │    │  upstream   │──────────────┼──▶ FlareSolverr
//!  GET http://site.com │  ├──────────┤    │  client     │◀─────────────┼─── {status, solution}
//!  ────────────────────┼─▶│  proxy   │───▶│             │              │
//!                      │  │  router  │    └──────┬──────┘              │
//!                      │  └──────────┘           │                     │
//!  ◀───────────────────┼──── text/html | {"error": ...} ◀──┘            │
//!                      └──────────────────────────────────────────────┘
//! ```

use clap::Parser;

use flareproxy::config::{load_config, Cli};
use flareproxy::lifecycle;
use flareproxy::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    tracing::info!("flareproxy v{} starting", env!("CARGO_PKG_VERSION"));

    let config = load_config(Cli::parse())?;
    lifecycle::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
