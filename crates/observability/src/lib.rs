//! Shared logging setup for the native binaries.

pub mod tracing;

pub use crate::tracing::{LogConfig, LogFormat};

/// Install the process-wide subscriber from `RUST_LOG` / `SKINCART_LOG_FORMAT`.
///
/// Later calls are no-ops.
pub fn init() {
    crate::tracing::init(LogConfig::from_env());
}
