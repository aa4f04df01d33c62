//! Logging setup for the bundlemap binary.
//!
//! Library crates only emit `tracing` events; the subscriber is installed here.

pub use bundlemap_config::LogLevel;
use std::sync::Once;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Level selected by `--quiet` / `-v` flags, if any.
pub fn level_from_flags(quiet: bool, verbose: u8) -> Option<LogLevel> {
    match (quiet, verbose) {
        (true, _) => Some(LogLevel::Silent),
        (false, 0) => None,
        (false, 1) => Some(LogLevel::Info),
        (false, 2) => Some(LogLevel::Debug),
        (false, _) => Some(LogLevel::Trace),
    }
}

/// Install the global subscriber, writing compact lines to stderr.
///
/// `RUST_LOG` takes precedence over `level`. Only the first call has an effect.
pub fn init_logging(level: LogLevel) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .init();
    });
}
