//! Tracing/logging setup shared by the service binaries and tests.

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::DEFAULT_FILTER);
}

/// Like [`init`], but with a caller-chosen fallback filter for when
/// `RUST_LOG` is unset.
pub fn init_with_default(filter: &str) {
    tracing::init(filter);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
