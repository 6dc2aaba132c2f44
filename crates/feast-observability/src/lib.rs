//! Observability for the Feast tools.
//!
//! This crate provides:
//! - `LogLevel` / `LogFormat` - Logging settings as they appear in config files
//! - `LogConfig` - The `[logging]` config section
//! - `init_logging` - Installs the global `tracing` subscriber

mod logging;

pub use logging::*;
