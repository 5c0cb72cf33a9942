//! Tracing bootstrap shared by binaries and examples embedding Feedex.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// Defaults to `info` for the feedex crates; override via `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "info,feedex_core=debug".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
