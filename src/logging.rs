//! Diagnostic logging to stderr via `tracing`.
//!
//! Results go to stdout; logs never do, so CSV output stays machine-readable.
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Map `-v` occurrences to a default level.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Install the global subscriber. `RUST_LOG` overrides `verbosity`.
///
/// Calling this again (e.g. from tests) leaves the first subscriber in place.
pub fn init_logging(verbosity: u8) {
    let level = level_for(verbosity);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    // Ignore error if a global subscriber is already set
    let _ = tracing::subscriber::set_global_default(subscriber);
}
