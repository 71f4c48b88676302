//! Tracing/logging setup shared by every embedding of the warehouse client.

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use crate::tracing::LogFormat;

/// Initialize process-wide logging with JSON output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    if tracing::init(LogFormat::Json) {
        ::tracing::debug!("logging initialized");
    }
}
