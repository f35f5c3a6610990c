//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → Build upstream client → Bind listeners → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Latch tripped → Each server drains → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownReason};
pub use startup::{run, Adapter, StartupError};
