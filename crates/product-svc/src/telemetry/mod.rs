//! Tracing setup: structured JSON logs, plus OTLP span export when configured.
//!
//! # Telemetry invariants
//!
//! - Unclassified errors are logged in full here and never echoed to callers.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); `RUST_LOG`
//!   takes precedence when set.

pub mod init;

pub use init::{init_telemetry, shutdown_telemetry};
