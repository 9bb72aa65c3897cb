//! Structured logging.
//!
//! # Responsibilities
//! - Install a `tracing` subscriber for binaries built on the SDK
//!
//! # Design Decisions
//! - The library only emits events; it never installs a subscriber on its own
//! - `RUST_LOG` wins over the default directive

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a formatting subscriber filtered by `RUST_LOG` or `default_directive`.
///
/// Returns false if a global subscriber was already set.
pub fn init_logging(default_directive: &str) -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok()
}
