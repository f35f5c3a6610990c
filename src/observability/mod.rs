//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routers + upstream client produce:
//!     → logging.rs (structured log events, request ID in every line)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (container log driver)
//!     → Prometheus scrape (optional)
//! ```

pub mod logging;
pub mod metrics;
