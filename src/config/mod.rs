//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command-line flags / process environment
//!     → loader.rs (clap parse, env fallback)
//!     → validation.rs (semantic checks)
//!     → AdapterConfig (validated, immutable)
//!     → shared via Arc to both listeners
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults so a bare `flareproxy` works inside compose
//! - Validation separates syntactic (clap) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, Cli, ConfigError};
pub use schema::AdapterConfig;
pub use validation::ValidationError;
