//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the lowcount tracing/logging system.
///
/// Reads `LOWCOUNT_LOG` environment variable for per-module log levels.
/// Format: `LOWCOUNT_LOG=lowcount_analysis::significance=debug,lowcount_core=warn`
///
/// Falls back to `lowcount=info` if `LOWCOUNT_LOG` is not set or is invalid.
///
/// Idempotent: later calls are no-ops.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("LOWCOUNT_LOG")
            .unwrap_or_else(|_| EnvFilter::new("lowcount=info"));

        // Another subscriber may already be installed by the host application.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
