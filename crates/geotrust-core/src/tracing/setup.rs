//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the GeoTrust tracing/logging system.
///
/// Reads `GEOTRUST_LOG` for per-component log levels, e.g.
/// `GEOTRUST_LOG=geotrust_pipeline=debug,geotrust_storage=warn`.
///
/// Falls back to `geotrust=info` if `GEOTRUST_LOG` is not set or is invalid.
///
/// Idempotent: calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("GEOTRUST_LOG")
            .unwrap_or_else(|_| EnvFilter::new("geotrust=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .init();
    });
}
