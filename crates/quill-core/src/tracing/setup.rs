//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the quill tracing/logging system.
///
/// Reads `QUILL_LOG` for per-module log levels, e.g.
/// `QUILL_LOG=quill_analysis::rules=debug,quill_analysis::comments=trace`.
///
/// Falls back to `quill=info` if `QUILL_LOG` is not set or is invalid.
/// Hosts that install their own subscriber should simply not call this.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("quill=info"));

        // A host may already own the global subscriber.
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
