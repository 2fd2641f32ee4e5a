//! Tracing/logging setup shared by the stockdesk binaries.

pub use crate::tracing::{LogFormat, ParseLogFormatError};

/// Initialize process-wide logging with the default (human-readable) format.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::default());
}

/// Initialize process-wide logging with an explicit output format.
pub fn init_with(format: LogFormat) {
    tracing::init(format);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
