//! Upstream automation service subsystem.
//!
//! # Data Flow
//! ```text
//! target URL + Intent
//!     → command.rs (UpstreamCommand {cmd, url, maxTimeout})
//!     → client.rs (POST application/json)
//!     → command.rs (UpstreamResult parse)
//!     → page HTML | UpstreamError
//! ```

pub mod client;
pub mod command;
pub mod error;

pub use client::UpstreamClient;
pub use command::{Intent, UpstreamCommand, UpstreamResult};
pub use error::UpstreamError;
