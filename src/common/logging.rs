//! Logging and tracing configuration
//!
//! Logs go to stderr so the resolved configuration on stdout stays
//! machine-readable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "runconf=info,warn";

/// Initialize tracing for the CLI (stderr logging)
///
/// Logs are controlled by the `RUST_LOG` environment variable.
/// `verbose` raises this crate to DEBUG when `RUST_LOG` is unset.
pub fn init_cli(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("runconf=debug,warn")
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
