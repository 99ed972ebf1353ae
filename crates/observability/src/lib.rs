//! Process-wide logging setup for the gateway binary.

/// Initialize tracing/logging.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

pub mod tracing;
