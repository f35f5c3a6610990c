//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! AdapterConfig addresses
//!     → listener.rs (bind, fail fast)
//!     → Hand off to HTTP layer
//! ```

pub mod listener;

pub use listener::{bind, ListenerError};
