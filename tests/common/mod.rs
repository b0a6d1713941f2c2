//! Common test infrastructure for imgops integration tests.
//!
//! Each test file compiles its own copy of this module, so items may appear
//! unused from the perspective of a single test file even though they're
//! used elsewhere.

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a test subscriber filtered by `RUST_LOG` (default `imgops=warn`).
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imgops=warn,pixel_ops=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer().without_time())
        .try_init();
}
