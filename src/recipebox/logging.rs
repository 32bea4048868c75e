//! Tracing setup for the CLI.
//!
//! The library only emits events; installing a subscriber is left to the
//! binary. Output goes to stderr so it never mixes with command output.

use tracing::Level;
use tracing_subscriber::EnvFilter;

pub const ENV_LOG: &str = "RECIPEBOX_LOG";
pub const DEFAULT_LEVEL: &str = "warn";

/// Builds the filter: `RECIPEBOX_LOG` if set, else `debug` when verbose,
/// else `warn`. HTTP client internals are held at `warn` either way.
pub fn build_filter(directive: Option<&str>, verbose: bool) -> EnvFilter {
    let base = match directive {
        Some(d) if !d.trim().is_empty() => d.to_string(),
        _ if verbose => "debug".to_string(),
        _ => DEFAULT_LEVEL.to_string(),
    };

    EnvFilter::try_new(&base)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
        .add_directive(
            "hyper=warn"
                .parse()
                .unwrap_or_else(|_| Level::WARN.into()),
        )
        .add_directive(
            "reqwest=warn"
                .parse()
                .unwrap_or_else(|_| Level::WARN.into()),
        )
}

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init(verbose: bool) {
    let directive = std::env::var(ENV_LOG).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(directive.as_deref(), verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
